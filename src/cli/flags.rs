//! Per-action argument parsing, delegated to clap.
//!
//! The action's declared flags and positional args are turned into a throwaway
//! `clap::Command`; clap does the parsing and the results are copied into [`ParsedFlags`].

use crate::error::TypedError;
use crate::registry::{Action, FlagValue, ParsedFlags};
use clap::{Arg, ArgAction, ArgMatches, Command};

fn build_command(command_line: &str, action: &Action) -> Command {
    let mut command = Command::new(command_line.to_string())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true);

    for flag in action.flags() {
        let mut arg = Arg::new(flag.name.clone())
            .long(flag.name.clone())
            .help(flag.help.clone());
        if let Some(short) = flag.short {
            arg = arg.short(short);
        }
        arg = match &flag.value_name {
            None => arg.action(ArgAction::SetTrue),
            Some(value_name) => {
                // The next token is the value even when it looks like a flag.
                let mut arg = arg
                    .value_name(value_name.clone())
                    .allow_hyphen_values(true)
                    .required(flag.required && flag.default.is_none())
                    .action(if flag.multiple {
                        ArgAction::Append
                    } else {
                        ArgAction::Set
                    });
                if let Some(default) = &flag.default {
                    arg = arg.default_value(default.clone());
                }
                arg
            }
        };
        command = command.arg(arg);
    }

    for (index, spec) in action.args().iter().enumerate() {
        let mut arg = Arg::new(spec.name.clone())
            .index(index + 1)
            .value_name(spec.name.to_uppercase())
            .help(spec.help.clone())
            .required(spec.required);
        arg = if spec.variadic {
            arg.num_args(1..).action(ArgAction::Append)
        } else {
            arg.action(ArgAction::Set)
        };
        command = command.arg(arg);
    }

    command
}

fn collect(action: &Action, matches: &ArgMatches) -> (Vec<String>, ParsedFlags) {
    let mut flags = ParsedFlags::default();
    for flag in action.flags() {
        if !flag.takes_value() {
            flags.insert(
                flag.name.clone(),
                FlagValue::Switch(matches.get_flag(&flag.name)),
            );
            continue;
        }
        let values: Vec<String> = matches
            .get_many::<String>(&flag.name)
            .map(|v| v.cloned().collect())
            .unwrap_or_default();
        if values.is_empty() {
            continue;
        }
        let value = if flag.multiple {
            FlagValue::Many(values)
        } else {
            FlagValue::Single(values.into_iter().next().unwrap_or_default())
        };
        flags.insert(flag.name.clone(), value);
    }

    let args = action
        .args()
        .iter()
        .flat_map(|spec| {
            matches
                .get_many::<String>(&spec.name)
                .map(|v| v.cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
        .collect();

    (args, flags)
}

/// Parse the tokens left after resolution against the action's declarations.
pub fn parse_action_args(
    command_line: &str,
    action: &Action,
    raw: &[String],
) -> Result<(Vec<String>, ParsedFlags), TypedError> {
    let matches = build_command(command_line, action)
        .try_get_matches_from(raw)
        .map_err(|e| clap_validation_error(e, command_line))?;
    Ok(collect(action, &matches))
}

/// Turn a clap parse failure into a validation error naming the command.
pub fn clap_validation_error(err: clap::Error, command_line: &str) -> TypedError {
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .next()
        .map(|line| line.trim_start_matches("error:").trim())
        .filter(|line| !line.is_empty())
        .unwrap_or("invalid arguments")
        .to_string();
    TypedError::validation(message).with_context("command", command_line)
}

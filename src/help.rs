//! Help text generated from registry metadata.
//!
//! Nothing here resolves or runs a command; every listing is built from the nodes the
//! registry already holds. Aliases are not listed.

use crate::output::Styler;
use crate::registry::{Action, Topic};

fn command_line(program: &str, path: &[String]) -> String {
    std::iter::once(program)
        .chain(path.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Aligned `name  summary` lines for a topic's children, in registration order.
pub fn command_listing(topic: &Topic, styler: &Styler) -> String {
    let width = topic
        .children()
        .iter()
        .map(|c| c.name().chars().count())
        .max()
        .unwrap_or(0);
    topic
        .children()
        .iter()
        .map(|child| {
            let name = format!("{:<width$}", child.name());
            format!("  {}   {}", styler.command(&name), child.summary())
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Help for the root or any topic.
pub fn render_topic_help(program: &str, path: &[String], topic: &Topic, styler: &Styler) -> String {
    let invocation = command_line(program, path);
    let mut out = String::new();
    if !topic.summary().is_empty() {
        out.push_str(topic.summary());
        out.push_str("\n\n");
    }
    out.push_str(&styler.bold("Usage:"));
    out.push_str(&format!("\n  {} <command> [args] [flags]\n", invocation));

    if !topic.children().is_empty() {
        out.push('\n');
        out.push_str(&styler.bold("Available commands:"));
        out.push('\n');
        out.push_str(&command_listing(topic, styler));
        out.push('\n');
    }

    if path.is_empty() {
        out.push('\n');
        out.push_str(&styler.bold("Global flags (before the command):"));
        out.push_str(
            "\n      --format <FORMAT>  Output format: human, json or table\
             \n      --no-color         Disable colored output\
             \n      --local            Run against the local server socket\
             \n      --debug            Show internal error details\
             \n      --config <PATH>    Configuration file\
             \n  -h, --help             Show help\n",
        );
    }

    out.push_str(&format!(
        "\nUse \"{} <command> --help\" for more information about a command.\n",
        invocation
    ));
    out
}

/// One-line usage for an action: `adminctl user create <email> [flags]`.
pub fn usage_line(program: &str, path: &[String], action: &Action) -> String {
    let mut usage = command_line(program, path);
    for arg in action.args() {
        let name = if arg.variadic {
            format!("{}...", arg.name)
        } else {
            arg.name.clone()
        };
        if arg.required {
            usage.push_str(&format!(" <{}>", name));
        } else {
            usage.push_str(&format!(" [{}]", name));
        }
    }
    if !action.flags().is_empty() {
        usage.push_str(" [flags]");
    }
    usage
}

/// Help for an action: usage, arguments, flags and examples.
pub fn render_action_help(
    program: &str,
    path: &[String],
    action: &Action,
    styler: &Styler,
) -> String {
    let mut out = String::new();
    if !action.summary().is_empty() {
        out.push_str(action.summary());
        out.push_str("\n\n");
    }
    out.push_str(&styler.bold("Usage:"));
    out.push_str(&format!("\n  {}\n", usage_line(program, path, action)));

    if !action.args().is_empty() {
        let width = action
            .args()
            .iter()
            .map(|a| a.name.len())
            .max()
            .unwrap_or(0);
        out.push('\n');
        out.push_str(&styler.bold("Arguments:"));
        out.push('\n');
        for arg in action.args() {
            out.push_str(&format!("  {:<width$}   {}\n", arg.name, arg.help));
        }
    }

    let flag_labels: Vec<String> = action
        .flags()
        .iter()
        .map(|flag| {
            let short = match flag.short {
                Some(c) => format!("-{}, ", c),
                None => "    ".to_string(),
            };
            match &flag.value_name {
                Some(value) => format!("{}--{} <{}>", short, flag.name, value),
                None => format!("{}--{}", short, flag.name),
            }
        })
        .collect();
    let width = flag_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max("-h, --help".len());

    out.push('\n');
    out.push_str(&styler.bold("Flags:"));
    out.push('\n');
    for (flag, label) in action.flags().iter().zip(&flag_labels) {
        let mut help = flag.help.clone();
        if flag.required {
            help.push_str(" (required)");
        }
        if let Some(default) = &flag.default {
            help.push_str(&format!(" [default: {}]", default));
        }
        out.push_str(&format!("  {:<width$}   {}\n", label, help));
    }
    out.push_str(&format!("  {:<width$}   Show help\n", "-h, --help"));

    if !action.examples().is_empty() {
        out.push('\n');
        out.push_str(&styler.bold("Examples:"));
        out.push('\n');
        for example in action.examples() {
            out.push_str(&format!("  {}\n", styler.command(example)));
        }
    }

    if action.is_local_capable() {
        out.push_str("\nThis command supports local mode (--local).\n");
    }
    out
}

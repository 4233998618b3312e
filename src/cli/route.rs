//! CLI route: the application (registry + advisor) and the per-invocation run context.
//!
//! Every invocation goes resolve → parse → run handler → emit → flush → follow-ups, and
//! any failure along the way ends in exactly one report on the error stream.

use crate::advisor::FollowUpAdvisor;
use crate::cli::flags::parse_action_args;
use crate::config::Settings;
use crate::error::{ErrorKind, TypedError};
use crate::help::{render_action_help, render_topic_help};
use crate::output::Printer;
use crate::registry::{Action, CommandRegistry, FlagSpec, Invocation, Resolution};
use crate::report::{Reporter, EXIT_SUCCESS};
use std::any::Any;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A built command tree together with its follow-up edges. Read-only after construction.
#[derive(Debug, Clone)]
pub struct App {
    registry: CommandRegistry,
    advisor: FollowUpAdvisor,
    login_example: Option<String>,
}

impl App {
    pub fn new(registry: CommandRegistry, advisor: FollowUpAdvisor) -> Self {
        Self {
            registry,
            advisor,
            login_example: None,
        }
    }

    /// Login invocation suggested when a command fails authentication.
    pub fn with_login_example(mut self, example: impl Into<String>) -> Self {
        self.login_example = Some(example.into());
        self
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn advisor(&self) -> &FollowUpAdvisor {
        &self.advisor
    }

    pub fn program(&self) -> &str {
        self.registry.program()
    }
}

/// Runtime context for one or more invocations: settings snapshot, printer and reporter.
pub struct RunContext<'a, O: Write, E: Write> {
    app: &'a App,
    settings: Settings,
    printer: Printer<O>,
    reporter: Reporter<E>,
}

impl<'a, O: Write, E: Write> RunContext<'a, O, E> {
    pub fn new(app: &'a App, settings: Settings, out: O, err: E) -> Self {
        let mut reporter = Reporter::new(app.program(), settings.debug, settings.color, err);
        if let Some(example) = &app.login_example {
            reporter = reporter.with_login_example(example.clone());
        }
        Self {
            app,
            settings,
            printer: Printer::new(settings.format, settings.color, out),
            reporter,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn printer(&self) -> &Printer<O> {
        &self.printer
    }

    pub fn reporter(&self) -> &Reporter<E> {
        &self.reporter
    }

    /// Output and error streams, in that order.
    pub fn into_streams(self) -> (O, E) {
        (self.printer.into_inner(), self.reporter.into_inner())
    }

    /// Run one invocation and return its exit code.
    pub fn execute<S: AsRef<str>>(&mut self, tokens: &[S]) -> i32 {
        self.printer.reset();
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();

        match tokens.split_first() {
            None => return self.show_help(&[]),
            Some((first, rest)) if first == "help" => return self.show_help(rest),
            Some(_) => {}
        }

        let app = self.app;
        match app.registry.resolve(&tokens) {
            Resolution::Unknown {
                attempted_path,
                token,
                ..
            } if is_help_flag(&token) => self.show_help(&attempted_path),
            Resolution::Unknown {
                attempted_path,
                token,
                suggestions,
            } => self
                .reporter
                .report_unknown(&attempted_path, &token, &suggestions),
            Resolution::Incomplete { topic_path, topic } => {
                self.reporter.report_incomplete(&topic_path, topic)
            }
            Resolution::Resolved {
                action,
                path,
                remaining_args,
            } if wants_help(action, &remaining_args) => {
                let text = render_action_help(app.program(), &path, action, self.printer.styler());
                self.write_help(text)
            }
            Resolution::Resolved {
                action,
                path,
                remaining_args,
            } => match self.run_action(action, &path, &remaining_args) {
                Ok(()) => EXIT_SUCCESS,
                Err(err) => {
                    self.printer.discard();
                    self.reporter.report(err)
                }
            },
        }
    }

    fn run_action(
        &mut self,
        action: &Action,
        path: &[String],
        raw: &[String],
    ) -> Result<(), TypedError> {
        let started = Instant::now();
        let command_line = command_line(self.app.program(), path);
        let first_example = action.examples().first().map(String::as_str);

        if self.settings.local_mode && !action.is_local_capable() {
            return Err(TypedError::validation(format!(
                "\"{}\" cannot run in local mode",
                command_line
            ))
            .with_context("command", command_line.as_str())
            .with_remediation("rerun without --local"));
        }

        let (args, flags) = parse_action_args(&command_line, action, raw).map_err(|mut e| {
            e.set_remediation_if_missing(first_example);
            e
        })?;

        let invocation = Invocation {
            path: path.to_vec(),
            args,
            flags,
            local_mode: self.settings.local_mode,
        };
        debug!(command = %command_line, args = invocation.args.len(), "Running handler");

        let records = catch_unwind(AssertUnwindSafe(|| action.run(&invocation)))
            .unwrap_or_else(|payload| {
                Err(TypedError::internal(panic_message(payload.as_ref()))
                    .with_context("command", command_line.as_str()))
            })
            .map_err(|mut e| {
                if *e.kind() == ErrorKind::Validation {
                    e.set_remediation_if_missing(first_example);
                }
                e
            })?;

        let count = records.len();
        self.printer
            .set_human_renderer(action.human_renderer().cloned());
        for record in records {
            self.printer.emit(record);
        }
        self.printer.flush()?;

        if let Err(e) = self
            .printer
            .print_follow_ups(self.app.advisor.suggest(path))
        {
            warn!(error = %e, "Failed to print follow-up suggestions");
        }

        info!(
            command = %command_line,
            records = count,
            duration_ms = started.elapsed().as_millis() as u64,
            "Command completed"
        );
        Ok(())
    }

    /// Help for a topic or action path given after `help` (or before `--help`).
    fn show_help(&mut self, path: &[String]) -> i32 {
        let app = self.app;
        let program = app.program();
        if path.is_empty() {
            let text = render_topic_help(program, &[], app.registry.root(), self.printer.styler());
            return self.write_help(text);
        }
        match app.registry.resolve(path) {
            Resolution::Resolved { action, path, .. } => {
                let text = render_action_help(program, &path, action, self.printer.styler());
                self.write_help(text)
            }
            Resolution::Incomplete { topic_path, topic } => {
                let text = render_topic_help(program, &topic_path, topic, self.printer.styler());
                self.write_help(text)
            }
            Resolution::Unknown {
                attempted_path,
                token,
                suggestions,
            } => self
                .reporter
                .report_unknown(&attempted_path, &token, &suggestions),
        }
    }

    fn write_help(&mut self, text: String) -> i32 {
        match self.printer.write_text(&text) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => self.reporter.report(e),
        }
    }
}

fn command_line(program: &str, path: &[String]) -> String {
    std::iter::once(program)
        .chain(path.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_help_flag(token: &str) -> bool {
    token == "-h" || token == "--help"
}

/// `-h`/`--help` among the action's tokens, ignoring anything after `--` and the values of
/// flags that take one (`--to -h` passes `-h` along).
fn wants_help(action: &Action, raw: &[String]) -> bool {
    let mut tokens = raw.iter().take_while(|t| t.as_str() != "--");
    while let Some(token) = tokens.next() {
        if is_help_flag(token) {
            return true;
        }
        if takes_next_as_value(action, token) {
            tokens.next();
        }
    }
    false
}

/// `--name` or `-s` of a flag whose value is the following token.
fn takes_next_as_value(action: &Action, token: &str) -> bool {
    let flag = match token.strip_prefix("--") {
        Some(long) => action.flags().iter().find(|f| f.name == long),
        None => {
            let mut chars = token.strip_prefix('-').unwrap_or_default().chars();
            let short = match (chars.next(), chars.next()) {
                (Some(short), None) => Some(short),
                _ => None,
            };
            action.flags().iter().find(|f| short.is_some() && f.short == short)
        }
    };
    flag.is_some_and(FlagSpec::takes_value)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

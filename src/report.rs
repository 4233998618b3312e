//! Error classification and reporting: the single place where a failure becomes text on
//! the error stream and a process exit code.

use crate::error::{ErrorKind, TypedError};
use crate::help::command_listing;
use crate::output::Styler;
use crate::registry::Topic;
use std::io::Write;
use tracing::{debug, warn};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INTERNAL: i32 = 2;
pub const EXIT_CANCELLED: i32 = 130;

/// Text and exit code chosen for one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub exit_code: i32,
}

/// Writes failures to the error stream. Never touches the output stream.
pub struct Reporter<W: Write> {
    program: String,
    login_example: String,
    debug: bool,
    styler: Styler,
    err: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(program: impl Into<String>, debug: bool, color: bool, err: W) -> Self {
        let program = program.into();
        let login_example = format!(
            "{} auth login <server-url> --name <profile> --username <username>",
            program
        );
        Self {
            program,
            login_example,
            debug,
            styler: Styler::new(color),
            err,
        }
    }

    /// Replace the login invocation suggested for authentication failures.
    pub fn with_login_example(mut self, example: impl Into<String>) -> Self {
        self.login_example = example.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Apply the reporting policy without writing anything.
    pub fn compose(&self, err: &TypedError) -> Report {
        let s = &self.styler;
        let mut lines = Vec::new();
        let exit_code = match err.kind() {
            ErrorKind::Auth => {
                lines.push(self.headline(err.message()));
                let example = err.remediation().unwrap_or(&self.login_example);
                lines.push(s.hint("Log in and try again:"));
                lines.push(format!("  {}", s.command(example)));
                EXIT_FAILURE
            }
            ErrorKind::Validation => {
                lines.push(self.headline(err.message()));
                lines.extend(self.context_lines(err));
                if let Some(example) = err.remediation() {
                    lines.push(s.hint("Example:"));
                    lines.push(format!("  {}", s.command(example)));
                }
                EXIT_FAILURE
            }
            ErrorKind::NotFound => {
                lines.push(self.headline(err.message()));
                lines.extend(self.context_lines(err));
                EXIT_FAILURE
            }
            ErrorKind::Api { status } => {
                let message = match status {
                    Some(code) => format!("{} (status {})", err.message(), code),
                    None => err.message().to_string(),
                };
                lines.push(self.headline(&message));
                EXIT_FAILURE
            }
            ErrorKind::Internal => {
                if self.debug {
                    lines.push(self.headline(&format!("unexpected error: {}", err.message())));
                    lines.extend(self.context_lines(err));
                } else {
                    lines.push(self.headline("unexpected error"));
                }
                EXIT_INTERNAL
            }
            ErrorKind::Cancelled => {
                let message = if err.message().is_empty() {
                    "operation cancelled".to_string()
                } else {
                    format!("operation cancelled: {}", err.message())
                };
                lines.push(self.headline(&message));
                EXIT_CANCELLED
            }
        };

        Report {
            text: lines.join("\n") + "\n",
            exit_code,
        }
    }

    /// Report a failed command. Always the last thing a failing invocation does.
    pub fn report(&mut self, err: TypedError) -> i32 {
        debug!(kind = %err.kind(), message = err.message(), "Command failed");
        let report = self.compose(&err);
        self.write(&report.text);
        report.exit_code
    }

    /// Report input that named no known command.
    pub fn report_unknown(
        &mut self,
        attempted_path: &[String],
        token: &str,
        suggestions: &[String],
    ) -> i32 {
        let scope = self.scope(attempted_path);
        let mut text = format!(
            "{}\n",
            self.headline(&format!("unknown command \"{}\" for \"{}\"", token, scope))
        );
        if !suggestions.is_empty() {
            text.push_str(&format!("\n{}\n", self.styler.hint("Did you mean this?")));
            for suggestion in suggestions {
                text.push_str(&format!("  {}\n", self.styler.command(suggestion)));
            }
        }
        text.push_str(&format!("\nRun '{} --help' for usage.\n", scope));
        self.write(&text);
        EXIT_FAILURE
    }

    /// Report input that stopped at a topic, listing what the topic offers.
    pub fn report_incomplete(&mut self, topic_path: &[String], topic: &Topic) -> i32 {
        let scope = self.scope(topic_path);
        let mut text = format!(
            "{}\n",
            self.headline(&format!("\"{}\" requires a subcommand", scope))
        );
        if !topic.children().is_empty() {
            text.push_str(&format!(
                "\n{}\n{}\n",
                self.styler.bold("Available commands:"),
                command_listing(topic, &self.styler)
            ));
        }
        self.write(&text);
        EXIT_FAILURE
    }

    pub fn writer(&self) -> &W {
        &self.err
    }

    pub fn into_inner(self) -> W {
        self.err
    }

    fn headline(&self, message: &str) -> String {
        format!("{} {}", self.styler.error("Error:"), message)
    }

    fn context_lines(&self, err: &TypedError) -> Vec<String> {
        err.context()
            .iter()
            .map(|(key, value)| format!("  {}: {}", key, value))
            .collect()
    }

    fn scope(&self, path: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.err.write_all(text.as_bytes()).and_then(|_| self.err.flush()) {
            warn!(error = %e, "Failed to write to the error stream");
        }
    }
}

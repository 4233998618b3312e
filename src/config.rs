//! Configuration System
//!
//! Layered configuration for one invocation: defaults, then the config file, then
//! `ADMINCTL_*` environment variables, then command-line flags. The result is reduced to a
//! read-only [`Settings`] snapshot taken once at invocation start.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

mod facade;
mod merge;
mod sources;

pub use facade::{CliOverrides, ConfigLoader};
pub use sources::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Output format: human, json or table
    #[serde(default = "default_format")]
    pub format: String,

    /// Colored output when writing to a terminal
    #[serde(default = "default_true")]
    pub color: bool,

    /// Talk to the local server instead of a remote connection
    #[serde(default)]
    pub local_mode: bool,

    /// Show internal error details
    #[serde(default)]
    pub debug: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_format() -> String {
    OutputFormat::Human.as_str().to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
            local_mode: false,
            debug: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl AdminConfig {
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.format
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                key: "format".to_string(),
                message,
            })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.output_format()?;
        self.logging.validate()
    }

    /// Reduce to the per-invocation snapshot.
    pub fn settings(&self, terminal: Terminal) -> Result<Settings, ConfigError> {
        Ok(Settings {
            format: self.output_format()?,
            color: self.color && terminal.stdout_is_terminal && !terminal.no_color,
            local_mode: self.local_mode,
            debug: self.debug,
        })
    }
}

/// What the process is attached to, for color decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub stdout_is_terminal: bool,
    /// `NO_COLOR` is set to a non-empty value.
    pub no_color: bool,
}

impl Terminal {
    pub fn detect() -> Self {
        Self {
            stdout_is_terminal: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }

    /// An interactive terminal with no color opt-out.
    pub fn interactive() -> Self {
        Self {
            stdout_is_terminal: true,
            no_color: false,
        }
    }

    /// Output redirected to a file or pipe.
    pub fn piped() -> Self {
        Self {
            stdout_is_terminal: false,
            no_color: false,
        }
    }
}

/// Resolved options for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub color: bool,
    pub local_mode: bool,
    pub debug: bool,
}

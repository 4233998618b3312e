//! CLI parse: clap types for the global flags. No behavior; definitions only.
//!
//! Everything after the global flags is handed to the command registry untouched.

use crate::config::CliOverrides;
use clap::Parser;
use std::path::PathBuf;

/// Administer a remote server from the command line
#[derive(Debug, Parser)]
#[command(name = "adminctl")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Output format: human, json or table
    #[arg(long)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Run against the local server instead of a remote connection
    #[arg(long)]
    pub local: bool,

    /// Show internal error details
    #[arg(long)]
    pub debug: bool,

    /// Configuration file path (overrides the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Show help
    #[arg(short, long)]
    pub help: bool,

    /// Command path, arguments and command flags
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Flags that take part in configuration layering. Unset flags leave lower layers alone.
    pub fn overrides(&self) -> CliOverrides {
        let log_level = if self.verbose && self.log_level.is_none() {
            Some("debug".to_string())
        } else {
            self.log_level.clone()
        };
        CliOverrides {
            format: self.format.clone(),
            color: self.no_color.then_some(false),
            local_mode: self.local.then_some(true),
            debug: self.debug.then_some(true),
            log_level,
            log_format: self.log_format.clone(),
        }
    }

    /// Tokens for the registry. A leading `--help` becomes `help <command...>`.
    pub fn command_tokens(&self) -> Vec<String> {
        if self.help {
            std::iter::once("help".to_string())
                .chain(self.command.iter().cloned())
                .collect()
        } else {
            self.command.clone()
        }
    }
}

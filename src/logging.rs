//! Logging System
//!
//! Structured diagnostics using the `tracing` crate. Logs go to stderr or a file, never to
//! stdout, so structured command output stays machine-parseable.

use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output includes "file"); defaults to the user data directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format on stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_format(&self.format)?;
        parse_output_destinations(&self.output)?;
        Ok(())
    }
}

/// Default log file: `$XDG_DATA_HOME/adminctl/adminctl.log` or the platform equivalent.
pub fn default_log_file() -> PathBuf {
    ProjectDirs::from("", "", "adminctl")
        .map(|dirs| dirs.data_dir().join("adminctl.log"))
        .unwrap_or_else(|| PathBuf::from("adminctl.log"))
}

/// Initialize the logging system
///
/// `ADMINCTL_LOG` (filter directives) and `ADMINCTL_LOG_FORMAT` win over the config.
/// Calling this again after a subscriber is installed is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let json = determine_format(config)? == LogFormat::Json;
    let output = parse_output_destinations(&config.output)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if output.stderr {
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(std::io::stderr);
        layers.push(if json {
            layer.json().boxed()
        } else {
            layer
                .with_ansi(use_ansi(config.color, std::io::stderr().is_terminal()))
                .boxed()
        });
    }

    if output.file {
        let path = config.file.clone().unwrap_or_else(default_log_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Logging(format!("Failed to create log directory: {}", e))
            })?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                ConfigError::Logging(format!("Failed to open log file {:?}: {}", path, e))
            })?;
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        layers.push(if json {
            layer.json().boxed()
        } else {
            layer.boxed()
        });
    }

    // A subscriber may already be installed (tests, embedding hosts).
    let _ = Registry::default().with(layers).with(filter).try_init();
    Ok(())
}

/// Escape codes only when color is on and stderr is a terminal.
fn use_ansi(color: bool, stderr_is_terminal: bool) -> bool {
    color && stderr_is_terminal
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("ADMINCTL_LOG") {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ConfigError::Logging(format!("Invalid log directive: {}", e)))?,
        );
    }
    Ok(filter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<LogFormat, ConfigError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidValue {
            key: "logging.format".to_string(),
            message: format!("'{}' (must be 'json' or 'text')", other),
        }),
    }
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<LogFormat, ConfigError> {
    if let Ok(format) = std::env::var("ADMINCTL_LOG_FORMAT") {
        if let Ok(parsed) = parse_format(&format) {
            return Ok(parsed);
        }
    }
    parse_format(&config.format)
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stderr: bool,
    file: bool,
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ConfigError> {
    match output {
        "stderr" => Ok(OutputDestinations {
            stderr: true,
            file: false,
        }),
        "file" => Ok(OutputDestinations {
            stderr: false,
            file: true,
        }),
        "file+stderr" => Ok(OutputDestinations {
            stderr: true,
            file: true,
        }),
        other => Err(ConfigError::InvalidValue {
            key: "logging.output".to_string(),
            message: format!("'{}' (must be 'stderr', 'file' or 'file+stderr')", other),
        }),
    }
}

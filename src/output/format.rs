//! Output format selection and color styling.

use owo_colors::OwoColorize;
use std::fmt;
use std::str::FromStr;

/// Presentation of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-friendly text, optionally colored.
    #[default]
    Human,
    /// Pretty JSON array of every record.
    Json,
    /// Aligned table, one row per record.
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }

    pub fn is_machine_readable(&self) -> bool {
        !matches!(self, OutputFormat::Human)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" | "plain" => Ok(OutputFormat::Human),
            "json" | "structured" => Ok(OutputFormat::Json),
            "table" | "tabular" => Ok(OutputFormat::Table),
            other => Err(format!(
                "unknown output format '{}' (expected human, json or table)",
                other
            )),
        }
    }
}

/// Applies ANSI styling when color is enabled, plain text otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Styler {
    color: bool,
}

impl Styler {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn hint(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn command(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

//! Error types for the adminctl command core.
//!
//! Runtime failures are [`TypedError`]s: a closed [`ErrorKind`] plus message, context and
//! remediation. Registry assembly failures are [`StructuralError`]s and never reach the
//! reporter. Configuration failures are [`ConfigError`]s, converted to validation errors at
//! the boundary.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Classification of a runtime failure. Selects the reporting policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or rejected credentials.
    Auth,
    /// The invocation itself is wrong (bad flag, bad value, unsupported mode).
    Validation,
    /// A named resource does not exist.
    NotFound,
    /// The remote API failed; carries the upstream HTTP status when known.
    Api { status: Option<u16> },
    /// Anything unexpected. Details are shown only in debug mode.
    Internal,
    /// The handler was interrupted or timed out.
    Cancelled,
}

impl ErrorKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ErrorKind::Auth => "auth",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Api { .. } => "api",
            ErrorKind::Internal => "internal",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A classified command failure, created where the failure happens and consumed once by
/// the reporter.
#[derive(Debug, Error)]
#[error("{kind} error: {message}")]
pub struct TypedError {
    kind: ErrorKind,
    message: String,
    context: Vec<(String, String)>,
    remediation: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl TypedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::new(),
            remediation: None,
            source: None,
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn api(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::new(ErrorKind::Api { status }, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    /// Wrap a failure that carries no classification of its own.
    pub fn unexpected(err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        let mut typed = Self::internal(format!("{:#}", err));
        typed.source = Some(err.into());
        typed
    }

    /// Attach a key/value hint, e.g. the identifier of a missing resource.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Attach a ready-to-run example command.
    pub fn with_remediation(mut self, example: impl Into<String>) -> Self {
        self.remediation = Some(example.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    pub fn remediation(&self) -> Option<&str> {
        self.remediation.as_deref()
    }

    pub(crate) fn set_remediation_if_missing(&mut self, example: Option<&str>) {
        if self.remediation.is_none() {
            self.remediation = example.map(str::to_string);
        }
    }
}

impl From<std::io::Error> for TypedError {
    fn from(err: std::io::Error) -> Self {
        TypedError::unexpected(err)
    }
}

/// Registry assembly errors. Fatal at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Invalid command name {name:?}: names must be non-empty and contain no whitespace")]
    InvalidName { name: String },

    #[error("Cannot register under '{path}': it is an action, not a topic")]
    ParentIsAction { path: String },

    #[error("'{path}' is already registered as a {existing}, cannot register it as a {requested}")]
    KindConflict {
        path: String,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("Action '{path}' is already registered")]
    DuplicateAction { path: String },

    #[error("Alias '{alias}' under '{parent}' collides with an existing command or alias")]
    AliasConflict { parent: String, alias: String },

    #[error("Action '{path}' declares unusable flags or arguments: {message}")]
    InvalidDeclaration { path: String, message: String },

    #[error("'{name}' is reserved for help and cannot name a top-level command")]
    ReservedName { name: String },

    #[error("Follow-up source '{path}' is not a registered action")]
    UnknownFollowUpSource { path: String },
}

/// Configuration loading and logging setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<ConfigError> for TypedError {
    fn from(err: ConfigError) -> Self {
        let typed = TypedError::validation(err.to_string());
        match err {
            ConfigError::FileNotFound(path) => {
                typed.with_context("config file", path.display().to_string())
            }
            ConfigError::InvalidValue { key, .. } => typed.with_context("key", key),
            _ => typed,
        }
    }
}

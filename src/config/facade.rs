//! Config loader: the one way to turn sources into an [`AdminConfig`].

use crate::config::{merge, sources, AdminConfig};
use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::collections::HashMap;
use std::path::PathBuf;

/// Values given on the command line. `None` leaves lower layers in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub format: Option<String>,
    pub color: Option<bool>,
    pub local_mode: Option<bool>,
    pub debug: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl CliOverrides {
    fn apply(
        &self,
        mut builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        if let Some(format) = &self.format {
            builder = builder.set_override("format", format.as_str())?;
        }
        if let Some(color) = self.color {
            builder = builder.set_override("color", color)?;
        }
        if let Some(local_mode) = self.local_mode {
            builder = builder.set_override("local_mode", local_mode)?;
        }
        if let Some(debug) = self.debug {
            builder = builder.set_override("debug", debug)?;
        }
        if let Some(level) = &self.log_level {
            builder = builder.set_override("logging.level", level.as_str())?;
        }
        if let Some(format) = &self.log_format {
            builder = builder.set_override("logging.format", format.as_str())?;
        }
        Ok(builder)
    }
}

/// Loads configuration with precedence flag > environment > config file > default.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    use_global_file: bool,
    env_prefix: String,
    env_source: Option<HashMap<String, String>>,
    overrides: CliOverrides,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// User config file (if present) and the process environment.
    pub fn new() -> Self {
        Self {
            file: None,
            use_global_file: true,
            env_prefix: "ADMINCTL".to_string(),
            env_source: None,
            overrides: CliOverrides::default(),
        }
    }

    /// Use `path` instead of the user config file. The file must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skip the user config file.
    pub fn without_global_file(mut self) -> Self {
        self.use_global_file = false;
        self
    }

    /// Read environment variables from `vars` instead of the process environment.
    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn load(&self) -> Result<AdminConfig, ConfigError> {
        let mut builder = merge::builder_with_defaults()?;

        builder = match &self.file {
            Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path.clone())),
            Some(path) => sources::add_file(builder, path),
            None if self.use_global_file => sources::add_global_file(builder),
            None => builder,
        };

        builder = sources::add_environment(builder, &self.env_prefix, self.env_source.clone());
        builder = self.overrides.apply(builder)?;

        let config: AdminConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

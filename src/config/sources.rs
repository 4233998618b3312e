//! Config sources: the config file and `ADMINCTL_*` environment variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the user-level config file, e.g. `~/.config/adminctl/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "adminctl").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the user-level config file if it exists.
pub fn add_global_file(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) if path.exists() => add_file(builder, &path),
        Some(path) => {
            debug!(config_path = %path.display(), "No user config file");
            builder
        }
        None => builder,
    }
}

/// Add an explicit config file. Format follows the extension.
pub fn add_file(builder: ConfigBuilder<DefaultState>, path: &Path) -> ConfigBuilder<DefaultState> {
    debug!(config_path = %path.display(), "Loading config file");
    builder.add_source(File::from(path).required(true))
}

/// Add environment overrides: `{PREFIX}_FORMAT`, `{PREFIX}_LOCAL_MODE`,
/// `{PREFIX}_LOGGING__LEVEL`. `source` replaces the process environment when given.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
    prefix: &str,
    source: Option<HashMap<String, String>>,
) -> ConfigBuilder<DefaultState> {
    let mut env = Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);
    if let Some(vars) = source {
        env = env.source(Some(vars.into_iter().collect()));
    }
    builder.add_source(env)
}

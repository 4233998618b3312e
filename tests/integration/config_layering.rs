//! Configuration precedence: flag > environment > config file > default.

use adminctl::config::{CliOverrides, ConfigLoader, Terminal};
use adminctl::error::{ConfigError, ErrorKind, TypedError};
use adminctl::output::OutputFormat;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("adminctl.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn loader(file: &Path, env: &[(&str, &str)]) -> ConfigLoader {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ConfigLoader::new().with_file(file).with_env_source(env)
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
format = "table"
color = false

[logging]
level = "info"
format = "json"
"#,
    );
    let config = loader(&path, &[]).load().unwrap();
    assert_eq!(config.output_format().unwrap(), OutputFormat::Table);
    assert!(!config.color);
    assert!(!config.local_mode);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_environment_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "format = \"table\"\ndebug = false\n");
    let config = loader(
        &path,
        &[("ADMINCTL_FORMAT", "json"), ("ADMINCTL_DEBUG", "true")],
    )
    .load()
    .unwrap();
    assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    assert!(config.debug);
}

#[test]
fn test_flags_override_everything() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "format = \"table\"\nlocal_mode = false\n");
    let config = loader(&path, &[("ADMINCTL_FORMAT", "json")])
        .with_overrides(CliOverrides {
            format: Some("human".to_string()),
            local_mode: Some(true),
            ..CliOverrides::default()
        })
        .load()
        .unwrap();
    assert_eq!(config.output_format().unwrap(), OutputFormat::Human);
    assert!(config.local_mode);
}

#[test]
fn test_settings_snapshot_applies_terminal_rules() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "format = \"json\"\n");
    let config = loader(&path, &[]).load().unwrap();

    let settings = config.settings(Terminal::interactive()).unwrap();
    assert_eq!(settings.format, OutputFormat::Json);
    assert!(settings.color);

    let settings = config.settings(Terminal::piped()).unwrap();
    assert!(!settings.color);
}

#[test]
fn test_invalid_value_becomes_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "format = \"yaml\"\n");
    let err = loader(&path, &[]).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));

    let typed: TypedError = err.into();
    assert_eq!(typed.kind(), &ErrorKind::Validation);
    assert_eq!(
        typed.context(),
        &[("key".to_string(), "format".to_string())]
    );
}

#[test]
fn test_malformed_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "format = \n");
    assert!(matches!(
        loader(&path, &[]).load(),
        Err(ConfigError::Load(_))
    ));
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let typed: TypedError = loader(&missing, &[]).load().unwrap_err().into();
    assert_eq!(typed.kind(), &ErrorKind::Validation);
    assert_eq!(typed.context()[0].0, "config file");
}

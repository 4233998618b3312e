//! Built-in commands every adminctl build carries.
//!
//! Domain commands are registered by the embedding application on top of these.

use crate::advisor::FollowUpAdvisor;
use crate::cli::App;
use crate::config::Settings;
use crate::error::StructuralError;
use crate::output::{OutputRecord, Styler};
use crate::registry::{Action, CommandRegistry, Invocation, Topic};
use serde_json::Value;
use std::path::PathBuf;

pub const PROGRAM: &str = "adminctl";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What `config show` reports besides the settings themselves.
#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    pub settings: Settings,
    /// Config file that was read, if any.
    pub file: Option<PathBuf>,
}

/// Registry with the built-in commands, ready for domain commands to be added.
pub fn builtin_registry(snapshot: ConfigSnapshot) -> Result<CommandRegistry, StructuralError> {
    let mut registry = CommandRegistry::new(PROGRAM, "Administer a server from the command line");

    registry.register::<&str>(&[], version_action())?;
    registry.register::<&str>(
        &[],
        Topic::new("config", "Inspect configuration")
            .alias("cfg")
            .child(config_show_action(snapshot)),
    )?;

    Ok(registry)
}

/// Follow-up edges for the built-in commands.
pub fn builtin_follow_ups(registry: &CommandRegistry) -> Result<FollowUpAdvisor, StructuralError> {
    let mut advisor = FollowUpAdvisor::new();
    advisor.add(registry, &["version"], [format!("{} help", PROGRAM)])?;
    advisor.add(
        registry,
        &["config", "show"],
        [format!("{} --format table config show", PROGRAM)],
    )?;
    Ok(advisor)
}

/// The application with only the built-in commands.
pub fn build_app(snapshot: ConfigSnapshot) -> Result<App, StructuralError> {
    let registry = builtin_registry(snapshot)?;
    let advisor = builtin_follow_ups(&registry)?;
    Ok(App::new(registry, advisor))
}

fn version_action() -> Action {
    Action::new("version", "Print the adminctl version", |_: &Invocation| {
        Ok(vec![OutputRecord::new()
            .field("name", PROGRAM)
            .field("version", VERSION)])
    })
    .local_capable()
    .example(format!("{} version", PROGRAM))
    .human(|record: &OutputRecord, styler: &Styler| {
        let version = record.get("version").and_then(Value::as_str).unwrap_or("-");
        format!("{} {}", styler.bold(PROGRAM), version)
    })
}

fn config_show_action(snapshot: ConfigSnapshot) -> Action {
    Action::new(
        "show",
        "Show the settings in effect for this invocation",
        move |_: &Invocation| {
            let settings = &snapshot.settings;
            let file = snapshot
                .file
                .as_ref()
                .map(|p| Value::from(p.display().to_string()))
                .unwrap_or(Value::Null);
            Ok(vec![OutputRecord::new()
                .field("format", settings.format.as_str())
                .field("color", settings.color)
                .field("local_mode", settings.local_mode)
                .field("debug", settings.debug)
                .field("config_file", file)])
        },
    )
    .local_capable()
    .example(format!("{} config show", PROGRAM))
}

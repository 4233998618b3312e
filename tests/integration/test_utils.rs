//! Shared fixtures: a small user/team command tree and a helper that runs one invocation
//! against in-memory streams.

use adminctl::advisor::FollowUpAdvisor;
use adminctl::cli::{App, RunContext};
use adminctl::config::Settings;
use adminctl::error::TypedError;
use adminctl::output::{OutputFormat, OutputRecord};
use adminctl::registry::{Action, ArgSpec, CommandRegistry, FlagSpec, Invocation, Topic};

/// Captured result of one invocation.
pub struct Outcome {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn user_records() -> Vec<OutputRecord> {
    vec![
        OutputRecord::new().field("id", "u1").field("name", "ann"),
        OutputRecord::new().field("id", "u2").field("name", "bob"),
        OutputRecord::new().field("id", "u3"),
    ]
}

pub fn sample_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new("adminctl", "Administer a server");

    registry
        .register(
            &[] as &[&str],
            Topic::new("user", "Manage users").alias("users"),
        )
        .unwrap();
    registry
        .register(
            &["user"],
            Action::new("list", "List users", |_: &Invocation| Ok(user_records()))
                .alias("ls")
                .local_capable()
                .flag(FlagSpec::switch("all", "Include deactivated users").short('a')),
        )
        .unwrap();
    registry
        .register(
            &["user"],
            Action::new("create", "Create a user", |inv: &Invocation| {
                let email = inv.arg(0).unwrap_or_default();
                if !email.contains('@') {
                    return Err(TypedError::validation("invalid email address")
                        .with_context("email", email));
                }
                Ok(vec![OutputRecord::new()
                    .field("id", "u4")
                    .field("email", email)
                    .field("admin", inv.flags.is_set("admin"))])
            })
            .arg(ArgSpec::required("email", "Email address"))
            .flag(FlagSpec::switch("admin", "Grant system admin"))
            .example("adminctl user create ann@example.com"),
        )
        .unwrap();
    registry
        .register(
            &["user"],
            Action::new("delete", "Delete a user", |_: &Invocation| {
                Err(TypedError::auth("cannot read credentials"))
            })
            .arg(ArgSpec::required("id", "User ID")),
        )
        .unwrap();
    registry
        .register(
            &["team"],
            Action::new("archive", "Archive a team", |inv: &Invocation| {
                Err(TypedError::not_found("team not found")
                    .with_context("team", inv.arg(0).unwrap_or_default()))
            })
            .arg(ArgSpec::required("team", "Team name")),
        )
        .unwrap();
    registry
        .register(
            &["server"],
            Action::new("status", "Server status", |_: &Invocation| {
                Err(TypedError::api("server unavailable", Some(503)))
            })
            .local_capable(),
        )
        .unwrap();

    registry
}

pub fn sample_app() -> App {
    let registry = sample_registry();
    let mut advisor = FollowUpAdvisor::new();
    advisor
        .add(
            &registry,
            &["user", "create"],
            ["adminctl user list", "adminctl team add <team> <user>"],
        )
        .unwrap();
    App::new(registry, advisor)
}

pub fn settings(format: OutputFormat) -> Settings {
    Settings {
        format,
        ..Settings::default()
    }
}

pub fn run(app: &App, settings: Settings, tokens: &[&str]) -> Outcome {
    let mut context = RunContext::new(app, settings, Vec::new(), Vec::new());
    let code = context.execute(tokens);
    let (out, err) = context.into_streams();
    Outcome {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

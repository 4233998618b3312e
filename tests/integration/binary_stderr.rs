//! Runs the built binary and checks that stderr carries the report and nothing else.

use super::test_utils::{run, settings};
use adminctl::commands::{build_app, ConfigSnapshot};
use adminctl::output::OutputFormat;
use std::process::{Command, Output};

fn adminctl(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_adminctl"))
        .args(args)
        .env_clear()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .unwrap()
}

/// What the run context writes to stderr for the same tokens, with color off.
fn expected_stderr(tokens: &[&str]) -> (i32, String) {
    let app = build_app(ConfigSnapshot::default()).unwrap();
    let outcome = run(&app, settings(OutputFormat::Human), tokens);
    (outcome.code, outcome.stderr)
}

#[test]
fn test_bad_flag_prints_only_the_report() {
    let output = adminctl(&["version", "--bogus"]);
    let stderr = String::from_utf8(output.stderr).unwrap();
    let (code, expected) = expected_stderr(&["version", "--bogus"]);

    assert_eq!(output.status.code(), Some(code));
    assert_eq!(code, 1);
    assert_eq!(stderr, expected);
    assert!(stderr.starts_with("Error: "));
    assert!(!stderr.contains("ERROR"));
    assert!(!stderr.contains('\x1b'));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_command_prints_only_the_report() {
    let output = adminctl(&["versoin"]);
    let stderr = String::from_utf8(output.stderr).unwrap();
    let (code, expected) = expected_stderr(&["versoin"]);

    assert_eq!(output.status.code(), Some(code));
    assert_eq!(stderr, expected);
    assert!(stderr.contains("  version\n"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_success_leaves_stderr_empty() {
    let output = adminctl(&["--format", "json", "version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
}

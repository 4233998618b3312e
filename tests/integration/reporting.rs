//! One message on stderr and one exit code per failure, whatever the error kind.

use super::test_utils::{run, sample_app, settings};
use adminctl::error::TypedError;
use adminctl::output::OutputFormat;
use adminctl::report::{Reporter, EXIT_CANCELLED, EXIT_FAILURE, EXIT_INTERNAL};

#[test]
fn test_auth_failure_prints_login_example() {
    let outcome = run(
        &sample_app(),
        settings(OutputFormat::Human),
        &["user", "delete", "u1"],
    );
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stdout.is_empty());
    assert_eq!(
        outcome.stderr,
        "Error: cannot read credentials\nLog in and try again:\n  adminctl auth login <server-url> --name <profile> --username <username>\n"
    );
}

#[test]
fn test_login_example_comes_from_app() {
    let app = sample_app().with_login_example("adminctl login --sso");
    let outcome = run(
        &app,
        settings(OutputFormat::Human),
        &["user", "delete", "u1"],
    );
    assert!(outcome.stderr.ends_with("Log in and try again:\n  adminctl login --sso\n"));
}

#[test]
fn test_validation_failure_shows_context_and_example() {
    let outcome = run(
        &sample_app(),
        settings(OutputFormat::Json),
        &["user", "create", "not-an-email"],
    );
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stdout.is_empty());
    assert_eq!(
        outcome.stderr,
        "Error: invalid email address\n  email: not-an-email\nExample:\n  adminctl user create ann@example.com\n"
    );
}

#[test]
fn test_not_found_has_context_only() {
    let outcome = run(
        &sample_app(),
        settings(OutputFormat::Table),
        &["team", "archive", "core"],
    );
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert_eq!(outcome.stderr, "Error: team not found\n  team: core\n");
}

#[test]
fn test_api_failure_includes_status() {
    let outcome = run(
        &sample_app(),
        settings(OutputFormat::Human),
        &["server", "status"],
    );
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert_eq!(outcome.stderr, "Error: server unavailable (status 503)\n");
}

#[test]
fn test_unknown_command_output() {
    let outcome = run(
        &sample_app(),
        settings(OutputFormat::Human),
        &["user", "lsit"],
    );
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stdout.is_empty());
    assert_eq!(
        outcome.stderr,
        "Error: unknown command \"lsit\" for \"adminctl user\"\n\nDid you mean this?\n  list\n\nRun 'adminctl user --help' for usage.\n"
    );
}

#[test]
fn test_incomplete_command_lists_actions() {
    let outcome = run(&sample_app(), settings(OutputFormat::Human), &["user"]);
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stderr.starts_with("Error: \"adminctl user\" requires a subcommand\n"));
    assert!(outcome.stderr.contains("  list     List users\n"));
    assert!(!outcome.stderr.contains("ls "));
}

#[test]
fn test_exit_codes_per_kind() {
    let reporter = Reporter::new("adminctl", false, false, Vec::new());
    let cases = [
        (TypedError::auth("a"), EXIT_FAILURE),
        (TypedError::validation("v"), EXIT_FAILURE),
        (TypedError::not_found("n"), EXIT_FAILURE),
        (TypedError::api("x", None), EXIT_FAILURE),
        (TypedError::internal("i"), EXIT_INTERNAL),
        (TypedError::cancelled("c"), EXIT_CANCELLED),
    ];
    for (err, code) in cases {
        assert_eq!(reporter.compose(&err).exit_code, code, "{}", err);
    }
}

#[test]
fn test_unexpected_failure_is_internal() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err = TypedError::unexpected(io);
    let reporter = Reporter::new("adminctl", true, false, Vec::new());
    let report = reporter.compose(&err);
    assert_eq!(report.exit_code, EXIT_INTERNAL);
    assert!(report.text.contains("pipe closed"));
}

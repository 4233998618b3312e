//! adminctl CLI Binary
//!
//! Wires configuration, logging, the command registry and the run context together.

use adminctl::cli::{clap_validation_error, Cli, RunContext};
use adminctl::commands::{build_app, ConfigSnapshot, PROGRAM};
use adminctl::config::{global_config_path, ConfigLoader, Terminal};
use adminctl::error::TypedError;
use adminctl::logging::init_logging;
use adminctl::report::{Reporter, EXIT_INTERNAL};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::debug;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return report_early(clap_validation_error(e, PROGRAM), false),
    };

    let mut config = match loader(&cli).load() {
        Ok(config) => config,
        Err(e) => return report_early(e.into(), cli.debug),
    };

    let terminal = Terminal::detect();
    // `--no-color`, `color = false` and NO_COLOR silence log colors too.
    config.logging.color &= config.color && !terminal.no_color;
    if let Err(e) = init_logging(&config.logging) {
        return report_early(e.into(), config.debug);
    }

    // Handler panics are caught and reported as internal errors; keep the default hook
    // from printing a second message.
    install_panic_hook();

    let settings = match config.settings(terminal) {
        Ok(settings) => settings,
        Err(e) => return report_early(e.into(), config.debug),
    };
    debug!(format = %settings.format, local_mode = settings.local_mode, "Settings resolved");

    let app = match build_app(ConfigSnapshot {
        settings,
        file: config_file_in_use(&cli),
    }) {
        Ok(app) => app,
        Err(e) => {
            debug!(error = %e, "Invalid command tree");
            eprintln!("{}: invalid command tree: {}", PROGRAM, e);
            return EXIT_INTERNAL;
        }
    };

    let mut context = RunContext::new(&app, settings, io::stdout().lock(), io::stderr().lock());
    context.execute(&cli.command_tokens())
}

fn loader(cli: &Cli) -> ConfigLoader {
    let loader = ConfigLoader::new().with_overrides(cli.overrides());
    match &cli.config {
        Some(path) => loader.with_file(path),
        None => loader,
    }
}

/// The config file this invocation read, if any.
fn config_file_in_use(cli: &Cli) -> Option<PathBuf> {
    cli.config
        .clone()
        .or_else(|| global_config_path().filter(|p| p.exists()))
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        debug!(panic = %info, "Handler panicked");
    }));
}

/// Report a failure that happened before the run context exists.
fn report_early(err: TypedError, debug: bool) -> i32 {
    Reporter::new(PROGRAM, debug, false, io::stderr()).report(err)
}

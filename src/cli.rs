//! CLI domain: global flag parsing, per-action argument parsing and the run context.
//! Handlers live in the registry; this layer only routes to them.

mod flags;
mod parse;
mod route;

pub use flags::{clap_validation_error, parse_action_args};
pub use parse::Cli;
pub use route::{App, RunContext};

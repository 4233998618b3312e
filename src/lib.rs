//! adminctl: Command Resolution and Reporting Core
//!
//! The topic/action command tree of an administrative CLI, typo suggestions for input that
//! names no command, buffered multi-format output, and a single error-reporting policy that
//! maps every failure to one message on stderr and one exit code.

pub mod advisor;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod help;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod registry;
pub mod report;

//! Output: format-agnostic records and the per-invocation printer.
//!
//! Commands produce [`OutputRecord`]s; the [`Printer`] decides how they look. Only
//! presentation differs between formats, never field identity or value.

mod format;
mod human;
mod printer;
mod record;
mod table;

pub use format::{OutputFormat, Styler};
pub use human::{format_value, render_human};
pub use printer::Printer;
pub use record::OutputRecord;
pub use table::{columns, render_table, EMPTY_MARKER};

//! Per-invocation printer: buffers records and writes them once, in the active format.

use crate::error::TypedError;
use crate::output::{render_human, render_table, OutputFormat, OutputRecord, Styler};
use crate::registry::HumanRenderer;
use std::io::Write;

/// Owns the record buffer of the current invocation and the output stream.
///
/// Format and color are fixed at construction. Every invocation starts with [`reset`],
/// ends with at most one effective [`flush`], and a failed invocation calls [`discard`] so
/// nothing it emitted reaches the stream.
///
/// [`reset`]: Printer::reset
/// [`flush`]: Printer::flush
/// [`discard`]: Printer::discard
pub struct Printer<W: Write> {
    format: OutputFormat,
    styler: Styler,
    buffer: Vec<OutputRecord>,
    renderer: Option<HumanRenderer>,
    flushed: bool,
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(format: OutputFormat, color: bool, out: W) -> Self {
        Self {
            format,
            styler: Styler::new(color),
            buffer: Vec::new(),
            renderer: None,
            flushed: false,
            out,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn styler(&self) -> &Styler {
        &self.styler
    }

    /// Use an action-specific human renderer for this invocation.
    pub fn set_human_renderer(&mut self, renderer: Option<HumanRenderer>) {
        self.renderer = renderer;
    }

    pub fn emit(&mut self, record: OutputRecord) {
        self.buffer.push(record);
    }

    pub fn buffered(&self) -> &[OutputRecord] {
        &self.buffer
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Render the buffer without writing it.
    pub fn render(&self) -> Result<String, TypedError> {
        match self.format {
            OutputFormat::Human => Ok(render_human(
                &self.buffer,
                self.renderer.as_ref(),
                &self.styler,
            )),
            OutputFormat::Json => {
                let mut out =
                    serde_json::to_string_pretty(&self.buffer).map_err(TypedError::unexpected)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Table => Ok(render_table(&self.buffer)),
        }
    }

    /// Write the buffer to the stream. Only the first call after a reset writes.
    pub fn flush(&mut self) -> Result<(), TypedError> {
        if self.flushed {
            return Ok(());
        }
        let rendered = self.render()?;
        self.flushed = true;
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Print suggested next commands. Human format only, after the flush.
    pub fn print_follow_ups(&mut self, suggestions: &[String]) -> Result<(), TypedError> {
        if self.format != OutputFormat::Human || suggestions.is_empty() || !self.flushed {
            return Ok(());
        }
        let mut text = format!("\n{}\n", self.styler.dim("Next steps:"));
        for suggestion in suggestions {
            text.push_str(&format!("  {}\n", self.styler.command(suggestion)));
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Write help or other static text directly, bypassing the record buffer.
    pub fn write_text(&mut self, text: &str) -> Result<(), TypedError> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Drop everything emitted by a failed invocation.
    pub fn discard(&mut self) {
        self.buffer.clear();
    }

    /// Start a fresh invocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.renderer = None;
        self.flushed = false;
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

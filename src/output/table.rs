//! Tabular rendering. Columns are the union of fields across the whole buffer, so widths
//! and alignment can only be computed once every record is known.

use crate::output::OutputRecord;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::Value;

/// Cell content for a field the record does not have (or holds null).
///
/// A string value of `"-"` renders the same, so a table cannot tell the three apart. Tables
/// are for reading; the JSON format keeps missing, null and `"-"` distinct.
pub const EMPTY_MARKER: &str = "-";

/// Union of field names in first-appearance order.
pub fn columns(records: &[OutputRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for (name, _) in record.fields() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_MARKER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

/// Render records as an aligned table. An empty buffer renders nothing.
pub fn render_table(records: &[OutputRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let columns = columns(records);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.force_no_tty();
    table.set_header(columns.clone());
    for record in records {
        let row: Vec<String> = columns.iter().map(|c| cell(record.get(c))).collect();
        table.add_row(row);
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}

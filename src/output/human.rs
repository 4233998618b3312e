//! Human rendering: `key: value` lines unless the action supplies its own renderer.

use crate::output::{OutputRecord, Styler};
use crate::registry::HumanRenderer;
use serde_json::Value;

const INDENT: &str = "  ";

/// Render a buffer for people. Records are separated by a blank line.
pub fn render_human(
    records: &[OutputRecord],
    renderer: Option<&HumanRenderer>,
    styler: &Styler,
) -> String {
    if records.is_empty() {
        return "No results.\n".to_string();
    }

    let blocks: Vec<String> = records
        .iter()
        .map(|record| match renderer {
            Some(render) => render(record, styler),
            None => render_record(record, styler),
        })
        .map(|block| block.trim_end_matches('\n').to_string())
        .collect();

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_record(record: &OutputRecord, styler: &Styler) -> String {
    let mut lines = Vec::new();
    for (key, value) in record.fields() {
        push_field(&mut lines, 0, key, value, styler);
    }
    lines.join("\n")
}

fn push_field(lines: &mut Vec<String>, depth: usize, key: &str, value: &Value, styler: &Styler) {
    let pad = INDENT.repeat(depth);
    let label = styler.bold(&format!("{}:", key));
    match value {
        Value::Object(map) if !map.is_empty() => {
            lines.push(format!("{}{}", pad, label));
            for (k, v) in map {
                push_field(lines, depth + 1, k, v, styler);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object()) => {
            lines.push(format!("{}{}", pad, label));
            for item in items {
                match item {
                    Value::Object(map) => {
                        let mut nested = Vec::new();
                        for (k, v) in map {
                            push_field(&mut nested, depth + 2, k, v, styler);
                        }
                        // Replace the first line's indentation with a list marker.
                        if let Some(first) = nested.first_mut() {
                            let marker = format!("{}- ", INDENT.repeat(depth + 1));
                            *first = format!("{}{}", marker, first.trim_start());
                        }
                        lines.extend(nested);
                    }
                    other => lines.push(format!(
                        "{}- {}",
                        INDENT.repeat(depth + 1),
                        format_value(other)
                    )),
                }
            }
        }
        other => lines.push(format!("{}{} {}", pad, label, format_value(other))),
    }
}

/// Inline rendering of a value: booleans as yes/no, null as `-`, sequences comma-joined.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "-".to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) if map.is_empty() => "-".to_string(),
        Value::Object(_) => value.to_string(),
    }
}

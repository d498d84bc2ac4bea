// file: src/cli/output.rs
// version: 1.1.0
// guid: 2d9a3c5e-7f1b-4e8d-9a6c-0b1d2e3f4a5b

//! Rendering of projected values and the command listing

use super::args::OutputFormat;
use crate::error::Result;
use crate::operation::OperationDescriptor;
use colored::Colorize;
use serde_json::Value;

/// Render a projected value for stdout.
///
/// `None` means nothing is printed (a `null` projection in text mode).
pub fn render(value: &Value, format: OutputFormat) -> Result<Option<String>> {
    let text = match (format, value) {
        (OutputFormat::Json, v) => serde_json::to_string_pretty(v)?,
        (OutputFormat::Text, Value::Null) => return Ok(None),
        (OutputFormat::Text, Value::String(s)) => s.clone(),
        (OutputFormat::Text, Value::Bool(b)) => b.to_string(),
        (OutputFormat::Text, Value::Number(n)) => n.to_string(),
        (OutputFormat::Text, v) => serde_json::to_string_pretty(v)?,
    };
    Ok(Some(text))
}

/// One line per command: name, action, a mutating marker and the default selector
pub fn render_listing(descriptors: &[OperationDescriptor], color: bool) -> String {
    let width = descriptors
        .iter()
        .map(|d| d.command.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for d in descriptors {
        let name = format!("{:<width$}", d.command, width = width);
        // Pad before colouring; escape codes would count toward the width.
        let marker = format!("{:<9}", if d.is_mutating() { "mutating" } else { "read-only" });
        let line = if color {
            let marker = if d.is_mutating() {
                marker.yellow()
            } else {
                marker.green()
            };
            format!("{}  {}  {}  [{}]", name.bold(), marker, d.action, d.default_selector)
        } else {
            format!("{}  {}  {}  [{}]", name, marker, d.action, d.default_selector)
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar or nested value as a single cell.
///
/// Top-product lists come out as `SKU:QTY` pairs joined by `; `.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_cell).collect::<Vec<_>>().join("; "),
        Value::Object(map) => match (map.get("sku"), map.get("quantity")) {
            (Some(sku), Some(qty)) => format!("{}:{}", format_cell(sku), format_cell(qty)),
            _ => serde_json::to_string(value).unwrap_or_default(),
        },
    }
}

/// The rows of a report: the bare array, or the `sellers` array inside a
/// computation envelope.
pub fn report_rows(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => map
            .get("result")
            .and_then(|r| r.get("sellers"))
            .and_then(Value::as_array),
        _ => None,
    }
}

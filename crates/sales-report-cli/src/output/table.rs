use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, report_rows};

/// Seller columns in report order.
const REPORT_COLUMNS: [&str; 7] = [
    "seller_id",
    "name",
    "revenue",
    "profit",
    "sales_count",
    "bonus",
    "top_products",
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = report_rows(value) {
        println!("{}", report_table(rows));
    }

    match value {
        Value::Object(envelope) => {
            if let Some(result) = envelope.get("result") {
                print_result_sections(result);
                print_envelope_notes(envelope);
            } else {
                println!("{}", field_table(envelope));
            }
        }
        Value::Array(_) => {}
        _ => println!("{}", value),
    }
}

fn report_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(REPORT_COLUMNS);
    for row in rows {
        let cells: Vec<String> = REPORT_COLUMNS
            .iter()
            .map(|col| row.get(*col).map(format_cell).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    builder.build()
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), format_cell(val)]);
    }
    builder.build()
}

/// Everything in the result except the seller rows, which are already
/// printed as the report table.
fn print_result_sections(result: &Value) {
    let Value::Object(res_map) = result else {
        println!("{}", format_cell(result));
        return;
    };

    if let Some(Value::Object(summary)) = res_map.get("summary") {
        println!("\nSummary:");
        println!("{}", field_table(summary));
    } else if !res_map.contains_key("sellers") {
        println!("{}", field_table(res_map));
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_table_keeps_column_order() {
        let rows = vec![json!({
            "seller_id": "s1",
            "name": "A B",
            "revenue": "100",
            "profit": "50",
            "sales_count": 1,
            "bonus": "7.5",
            "top_products": [{"sku": "p1", "quantity": 5}]
        })];
        let rendered = report_table(&rows).to_string();
        let header = rendered.lines().nth(1).unwrap();
        let seller_pos = header.find("seller_id").unwrap();
        let bonus_pos = header.find("bonus").unwrap();
        assert!(seller_pos < bonus_pos);
        assert!(rendered.contains("p1:5"));
        assert!(rendered.contains("A B"));
    }

    #[test]
    fn test_field_table_lists_summary() {
        let summary = json!({"seller_count": 3, "total_bonus": "15.69"});
        let rendered = field_table(summary.as_object().unwrap()).to_string();
        assert!(rendered.contains("total_bonus"));
        assert!(rendered.contains("15.69"));
    }
}

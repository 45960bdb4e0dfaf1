use serde_json::Value;
use std::io;

use super::{format_cell, report_rows};

/// Write output as CSV to stdout: one row per seller for reports, a
/// field/value listing for single results.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = report_rows(value) {
        write_rows(&mut wtr, rows);
    } else if let Some(Value::Object(result)) = value.get("result") {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in result {
            let _ = wtr.write_record([key.as_str(), &format_cell(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_cell(value)]);
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_rows_flattens_top_products() {
        let rows = vec![json!({
            "seller_id": "s1",
            "bonus": "7.5",
            "top_products": [{"sku": "p1", "quantity": 5}]
        })];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, &rows);
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("bonus,seller_id,top_products"));
        assert_eq!(lines.next(), Some("7.5,s1,p1:5"));
    }
}

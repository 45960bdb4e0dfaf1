use serde_json::Value;

use super::format_cell;

/// Print just the headline figure of the output.
///
/// For a full analysis that is the total revenue from the summary; for the
/// single-value commands it is the bonus or revenue.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let scope = result_obj.get("summary").unwrap_or(result_obj);

    let priority_keys = ["total_revenue", "bonus", "revenue"];

    if let Value::Object(map) = scope {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_cell(val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_cell(val));
        }
    }

    // Bare report: one "seller_id revenue" line per seller
    if let Value::Array(rows) = scope {
        return rows
            .iter()
            .map(|r| {
                format!(
                    "{} {}",
                    r.get("seller_id").map(format_cell).unwrap_or_default(),
                    r.get("revenue").map(format_cell).unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    format_cell(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headline_prefers_summary_total() {
        let value = json!({"result": {"sellers": [], "summary": {"seller_count": 2, "total_revenue": "302.7"}}});
        assert_eq!(headline(&value), "302.7");
    }

    #[test]
    fn test_headline_single_value_commands() {
        assert_eq!(headline(&json!({"result": {"index": 0, "bonus": "7.5"}})), "7.5");
        assert_eq!(headline(&json!({"result": {"sku": "-", "revenue": "50.97"}})), "50.97");
    }

    #[test]
    fn test_headline_bare_report() {
        let value = json!([{"seller_id": "s1", "revenue": "100"}, {"seller_id": "s2", "revenue": "5"}]);
        assert_eq!(headline(&value), "s1 100\ns2 5");
    }
}

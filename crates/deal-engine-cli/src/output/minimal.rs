use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: search the result (including nested phases) for well-known
/// output fields in priority order, then fall back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "net_profit",
        "cash_on_cash_return",
        "monthly_cash_flow",
        "monthly_payment",
        "value",
        "average",
        "total",
        "default",
        "roi",
    ];

    for key in &priority_keys {
        if let Some(found) = find_key(result_obj, key) {
            if !found.is_null() {
                println!("{}", format_minimal(found));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

/// Depth-first search for a key, so `monthly_cash_flow` is found inside
/// the BRRRR `phase3` object without the caller knowing the nesting.
fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map = value.as_object()?;

    if let Some(found) = map.get(key) {
        return Some(found);
    }

    for val in map.values() {
        if val.is_object() {
            if let Some(found) = find_key(val, key) {
                return Some(found);
            }
        }
    }

    None
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

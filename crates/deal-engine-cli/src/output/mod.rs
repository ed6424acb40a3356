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

/// Flatten one level of nesting into dotted keys, so BRRRR phase results
/// render as `phase1.down_payment` rows instead of opaque JSON blobs.
/// Arrays and deeper nesting are left as values for the formatter to render.
pub(crate) fn flatten_result(value: &Value) -> Vec<(String, Value)> {
    let mut rows = Vec::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Object(inner) => {
                    for (inner_key, inner_val) in inner {
                        rows.push((format!("{key}.{inner_key}"), inner_val.clone()));
                    }
                }
                other => rows.push((key.clone(), other.clone())),
            }
        }
    }

    rows
}

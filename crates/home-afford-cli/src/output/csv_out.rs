use serde_json::Value;
use std::io;

use super::{flatten, format_scalar, result_of};

/// Write output as two-column CSV (field, value) to stdout. Nested objects
/// become dotted field names and array elements are indexed, so scenarios
/// appear as `scenarios[0].result.max_home_price`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = wtr.write_record(["field", "value"]);

    match result_of(value) {
        Value::Object(map) => {
            for (key, val) in flatten(map) {
                write_value(&mut wtr, &key, &val);
            }
        }
        other => write_value(&mut wtr, "value", other),
    }

    let _ = wtr.flush();
}

fn write_value(wtr: &mut csv::Writer<io::StdoutLock<'_>>, key: &str, value: &Value) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let indexed = format!("{key}[{i}]");
                match item {
                    Value::Object(map) => {
                        for (sub, val) in flatten(map) {
                            write_value(wtr, &format!("{indexed}.{sub}"), &val);
                        }
                    }
                    other => write_value(wtr, &indexed, other),
                }
            }
        }
        other => {
            let _ = wtr.write_record([key, &format_scalar(other)]);
        }
    }
}

use serde_json::Value;

use super::{format_scalar, result_of};

/// Key answer fields, most important first. Dotted keys reach into nested
/// objects.
const PRIORITY_KEYS: [&str; 9] = [
    "baseline.max_home_price",
    "max_home_price",
    "monthly_payment",
    "adjusted_rate",
    "max_dti",
    "annual_percent",
    "pmi_rate",
    "next_fico_band",
    "next_ltv_band",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    for key in PRIORITY_KEYS {
        if let Some(val) = lookup_dotted(result, key) {
            if !val.is_null() {
                println!("{}", format_scalar(val));
                return;
            }
        }
    }

    // Fall back to first field
    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result));
}

fn lookup_dotted<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(value, |current, part| current.get(part))
}

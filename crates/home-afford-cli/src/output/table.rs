use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Columns shown per scenario; the full detail is available as JSON.
const SCENARIO_COLUMNS: [&str; 6] = [
    "description",
    "result.max_home_price",
    "price_change",
    "result.monthly_payment",
    "payment_change",
    "result.adjusted_rate",
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", format_scalar(value));
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            print_fields(result);
            if let Some(Value::Array(scenarios)) = result.get("scenarios") {
                print_scenarios(scenarios);
            }
            print_notes(envelope);
        }
        _ => print_fields(envelope),
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        if val.is_array() {
            continue;
        }
        builder.push_record([key, format_scalar(&val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_scenarios(scenarios: &[Value]) {
    if scenarios.is_empty() {
        println!("\nNo improvement scenarios available.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(SCENARIO_COLUMNS);
    for scenario in scenarios {
        let Value::Object(map) = scenario else {
            continue;
        };
        let flat: Map<String, Value> = flatten(map).into_iter().collect();
        let row: Vec<String> = SCENARIO_COLUMNS
            .iter()
            .map(|col| flat.get(*col).map(format_scalar).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("\nScenarios:");
    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &Map<String, Value>) {
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

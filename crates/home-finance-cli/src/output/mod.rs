pub mod csv_out;
pub mod minimal;
pub mod table;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::OutputFormat;

/// Result fields holding arrays of rows, in rendering priority order.
pub const ROW_FIELDS: [&str; 2] = ["rows", "annual_summary"];

/// Dispatch output to the appropriate formatter, rounding for display first.
pub fn format_output(format: &OutputFormat, mut value: Value, precision: Option<u32>) {
    if let Some(dp) = precision {
        round_decimals(&mut value, dp);
    }

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(&value),
        OutputFormat::Csv => csv_out::print_csv(&value),
        OutputFormat::Minimal => minimal::print_minimal(&value),
    }
}

/// Round every decimal string in `value` to `dp` places, midpoint away from zero.
///
/// Decimals serialize as strings, so anything that parses as one is rounded;
/// dates, versions and free text do not parse and are left alone.
pub fn round_decimals(value: &mut Value, dp: u32) {
    match value {
        Value::String(s) => {
            if let Ok(d) = s.parse::<Decimal>() {
                *s = d
                    .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
                    .to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|v| round_decimals(v, dp)),
        Value::Object(map) => map.values_mut().for_each(|v| round_decimals(v, dp)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rounds_nested_decimal_strings() {
        let mut value = json!({
            "result": {
                "principal_and_interest_monthly": "1438.9161760794",
                "rows": [{"balance": "239761.0838239206", "payment_date": "2027-03-01"}]
            },
            "metadata": {"version": "0.1.0", "computation_time_us": 12}
        });
        round_decimals(&mut value, 2);

        assert_eq!(value["result"]["principal_and_interest_monthly"], "1438.92");
        assert_eq!(value["result"]["rows"][0]["balance"], "239761.08");
        assert_eq!(value["result"]["rows"][0]["payment_date"], "2027-03-01");
        assert_eq!(value["metadata"]["version"], "0.1.0");
        assert_eq!(value["metadata"]["computation_time_us"], 12);
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        let mut value = json!("2.5");
        round_decimals(&mut value, 0);
        assert_eq!(value, "3");
    }
}

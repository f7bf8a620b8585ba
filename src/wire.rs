//! JSON wire format for simulations
//!
//! One simulation is a JSON array of
//! `{"operation": "buy"|"sell", "unit-cost": <number>, "quantity": <integer>}`
//! records; results are rendered as `[{"tax":0.00}, ...]`. Numbers are read
//! and written through `serde_json::Number` (built with `arbitrary_precision`)
//! so monetary values never pass through `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::str::FromStr;

use crate::error::CapitalGainsError;
use crate::operation::Operation;
use crate::tax::TaxResult;
use crate::utils::round_currency;

#[derive(Debug, Deserialize)]
struct OperationRecord {
    operation: String,
    #[serde(rename = "unit-cost")]
    unit_cost: Number,
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct TaxRecord {
    tax: Number,
}

/// Parse one simulation line into operations, preserving input order.
pub fn parse_operations(json_str: &str) -> Result<Vec<Operation>, CapitalGainsError> {
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| CapitalGainsError::InvalidJson(e.to_string()))?;

    let records = Vec::<OperationRecord>::deserialize(value)
        .map_err(|e| CapitalGainsError::ParseError(e.to_string()))?;

    records
        .into_iter()
        .map(|record| {
            let unit_cost = decimal_from_number(&record.unit_cost)?;
            Operation::new(&record.operation, unit_cost, record.quantity)
        })
        .collect()
}

/// Render results as a single-line JSON array, amounts with two decimals.
pub fn format_results(results: &[TaxResult]) -> Result<String, CapitalGainsError> {
    let records = results
        .iter()
        .map(|r| Ok(TaxRecord { tax: number_from_amount(r.tax)? }))
        .collect::<Result<Vec<_>, CapitalGainsError>>()?;

    serde_json::to_string(&records).map_err(|e| CapitalGainsError::ParseError(e.to_string()))
}

fn decimal_from_number(number: &Number) -> Result<Decimal, CapitalGainsError> {
    let text = number.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| CapitalGainsError::ParseError(format!("invalid unit-cost {}: {}", text, e)))
}

fn number_from_amount(amount: Decimal) -> Result<Number, CapitalGainsError> {
    Number::from_str(&format!("{:.2}", round_currency(amount)))
        .map_err(|e| CapitalGainsError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_operations() {
        let json = r#"[{"operation":"buy", "unit-cost":10.00, "quantity": 100},{"operation":"sell", "unit-cost":15.00, "quantity": 50}]"#;

        let ops = parse_operations(json).unwrap();

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].kind, OperationKind::Buy);
        assert_eq!(ops[0].unit_cost, dec!(10.00));
        assert_eq!(ops[0].unit_cost.scale(), 2);
        assert_eq!(ops[0].quantity, 100);
        assert_eq!(ops[1].kind, OperationKind::Sell);
        assert_eq!(ops[1].unit_cost, dec!(15.00));
        assert_eq!(ops[1].quantity, 50);
    }

    #[test]
    fn test_parse_keeps_full_precision() {
        let ops = parse_operations(r#"[{"operation":"buy","unit-cost":0.1234567,"quantity":3}]"#)
            .unwrap();
        assert_eq!(ops[0].unit_cost, dec!(0.1234567));

        let ops = parse_operations(r#"[{"operation":"buy","unit-cost":1e1,"quantity":3}]"#).unwrap();
        assert_eq!(ops[0].unit_cost, dec!(10));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_operations("invalid json").unwrap_err();
        assert!(matches!(err, CapitalGainsError::InvalidJson(_)));

        let err = parse_operations(r#"[{"operation":"buy""#).unwrap_err();
        assert!(matches!(err, CapitalGainsError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_wrong_shape() {
        // A bare object instead of a list
        let err =
            parse_operations(r#"{"operation":"buy", "unit-cost":10.00, "quantity": 100}"#).unwrap_err();
        assert!(matches!(err, CapitalGainsError::ParseError(_)));

        let err = parse_operations(r#"[{"operation":"buy", "quantity": 100}]"#).unwrap_err();
        assert!(err.to_string().contains("unit-cost"));

        let err = parse_operations(r#"[{"operation":"buy", "unit-cost":"10", "quantity": 1}]"#)
            .unwrap_err();
        assert!(matches!(err, CapitalGainsError::ParseError(_)));
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = parse_operations(r#"[{"operation":"short", "unit-cost":10, "quantity": 1}]"#)
            .unwrap_err();
        assert!(matches!(err, CapitalGainsError::InvalidOperationKind(ref k) if k == "short"));
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_operations("[]").unwrap().is_empty());
    }

    #[test]
    fn test_format_results() {
        let results = vec![TaxResult::zero(), TaxResult::new(dec!(10000.5))];

        let json = format_results(&results).unwrap();
        assert_eq!(json, r#"[{"tax":0.00},{"tax":10000.50}]"#);

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
        assert_eq!(parsed[1]["tax"].as_f64(), Some(10000.5));
    }

    #[test]
    fn test_format_results_empty() {
        assert_eq!(format_results(&[]).unwrap(), "[]");
    }
}

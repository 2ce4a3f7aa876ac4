//! Numeric rules: prices and timestamps

use crate::error::TransformError;
use serde_json::{json, Value};

const MICROS_PER_UNIT: f64 = 1_000_000.0;
const MILLIS_PER_SECOND: i64 = 1000;

/// Micro-unit price to a decimal amount. Whole amounts come out as
/// integers (`1000000` gives `1`); anything that does not yield a non-zero
/// finite amount becomes `0`.
pub fn price(value: &Value) -> Result<Value, TransformError> {
    let micros = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match micros.map(|m| m / MICROS_PER_UNIT) {
        Some(amount) if amount != 0.0 && amount.is_finite() => whole_or_decimal(amount),
        _ => json!(0),
    })
}

fn whole_or_decimal(amount: f64) -> Value {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        json!(amount as i64)
    } else {
        json!(amount)
    }
}

/// Free only when the raw price is exactly zero; unknown is not free
pub fn free(value: &Value) -> Result<Value, TransformError> {
    let is_zero = matches!(value, Value::Number(n) if n.as_f64() == Some(0.0));
    Ok(Value::Bool(is_zero))
}

/// Epoch seconds to epoch milliseconds.
///
/// A `null` timestamp stays `null` rather than becoming `0`, so a missing
/// update date is never reported as the Unix epoch.
pub fn updated_millis(value: &Value) -> Result<Value, TransformError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Number(n) => match n.as_i64() {
            Some(secs) => secs
                .checked_mul(MILLIS_PER_SECOND)
                .map(Value::from)
                .ok_or(TransformError::Overflow(secs)),
            None => Ok(json!(n.as_f64().unwrap_or_default() * MILLIS_PER_SECOND as f64)),
        },
        other => Err(TransformError::shape("number", other)),
    }
}

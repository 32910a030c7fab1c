//! Reusable field filters
//!
//! These filters coerce raw field values before the post-coercion validators
//! run. Values a filter does not apply to pass through unchanged.

use anyhow::Result;
use serde_json::{Number, Value};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: empty string becomes null
pub fn empty_to_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value.as_str() {
        Some("") => Ok(Value::Null),
        _ => Ok(value),
    }
}

/// Filter: numbers become their text form (`1` → `"1"`, `1.0` → `"1"`)
///
/// Flag fields are stored as text; a numeric flag keeps its spelling, except
/// that an integral float loses its fractional part.
pub fn number_to_text() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::Number(n) => Ok(Value::String(number_text(&n))),
        other => Ok(other),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            format!("{}", v as i64)
        }
        _ => n.to_string(),
    }
}

/// Parse numeric text the way a lenient spreadsheet would
///
/// Accepts decimal and exponent forms plus unsigned `0x`, `0o` and `0b`
/// integer literals. Whitespace around the text is ignored.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0o") | Some("0O") => 8,
        Some("0b") | Some("0B") => 2,
        _ => return text.parse::<f64>().ok(),
    };
    let digits = &text[2..];
    if digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Filter: coerce to a finite number, or null
///
/// Native numbers are kept; numeric strings are parsed after trimming, with
/// `0x`/`0o`/`0b` integer literals accepted.
/// Anything that does not yield a finite number becomes null instead of
/// failing, so a bad count never blocks a save.
pub fn number_or_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        let parsed = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_number(s),
            _ => None,
        };
        Ok(parsed
            .filter(|n| n.is_finite())
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null))
    }
}

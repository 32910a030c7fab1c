//! Reusable field validators
//!
//! A validator inspects a value and either accepts it or returns the
//! human-readable message to report against the field.

use serde_json::Value;

/// Message reported when the site name is missing or blank
pub const SITE_REQUIRED: &str = "Site name is required";

/// Name of a JSON value's type, as used in messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validator: field is required (not null)
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_null() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: value is a string or null
pub fn string_or_null() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::String(_) | Value::Null => Ok(()),
        other => Err(format!("Expected string, received {}", type_name(other))),
    }
}

/// Validator: value is a string, a number or null
pub fn scalar_or_null() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::String(_) | Value::Number(_) | Value::Null => Ok(()),
        other => Err(format!("Expected string, received {}", type_name(other))),
    }
}

//! Truthiness convention for flag fields
//!
//! Flag fields (`premium_hosting`, `cloudflare`, ...) are stored as the raw
//! text that was entered, e.g. `"Yes"`, `"1"` or `"n/a"`. Whether a flag is
//! *on* is decided here and nowhere else.

use serde_json::Value;

const TRUTHY: [&str; 4] = ["1", "yes", "true", "y"];

/// Is this stored flag text on?
///
/// On when, trimmed and lowercased, it is one of `1`, `yes`, `true`, `y`.
/// Anything else, including null and unrecognized spellings, is off.
pub fn is_on(value: Option<&str>) -> bool {
    match value {
        Some(text) => {
            let normalized = text.trim().to_lowercase();
            TRUTHY.contains(&normalized.as_str())
        }
        None => false,
    }
}

/// Truthiness of an untyped value: strings as in [`is_on`], the number `1`
pub fn is_on_value(value: &Value) -> bool {
    match value {
        Value::String(s) => is_on(Some(s)),
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// "Yes" / "No" rendering of a flag
pub fn format_yes_no(value: Option<&str>) -> &'static str {
    if is_on(value) { "Yes" } else { "No" }
}

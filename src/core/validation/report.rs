//! Field-keyed validation report

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Every validation failure of one input, grouped by field
///
/// `form_errors` holds problems with the input as a whole (e.g. it is not an
/// object); `field_errors` maps a field name to its non-empty, ordered list of
/// messages. Serializes as `{"formErrors": [...], "fieldErrors": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Record a message against a field
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record a message against the input as a whole
    pub fn push_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Messages recorded for a field
    pub fn messages(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.field_errors.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        parts.extend(
            self.field_errors
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, messages.join("; "))),
        );
        write!(f, "{}", parts.join(", "))
    }
}

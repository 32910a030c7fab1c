//! Batch validation for bulk imports
//!
//! Each candidate row is validated on its own in create mode. A failing row is
//! set aside with its label and messages; the rest of the batch is unaffected.

use super::report::FieldErrors;
use super::validate_create;
use crate::core::field::SiteField;
use crate::core::site::SiteFields;
use serde::Serialize;
use serde_json::Value;

/// A row that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRow {
    /// 1-based position of the row in the input
    pub position: usize,
    pub fields: SiteFields,
}

/// A row that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// 1-based position of the row in the input
    pub position: usize,
    /// The row's site name as given, or `row N` when it has none
    pub label: String,
    pub errors: FieldErrors,
}

/// Result of validating a batch, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub accepted: Vec<AcceptedRow>,
    pub rejected: Vec<RejectedRow>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Human-readable label of a raw row: its untouched site name when it has a
/// non-blank one, otherwise its position
pub fn row_label(row: &Value, position: usize) -> String {
    match row.get(SiteField::Site.as_str()).and_then(Value::as_str) {
        Some(site) if !site.trim().is_empty() => site.to_string(),
        _ => format!("row {}", position),
    }
}

/// Validate many candidate records independently
pub fn validate_batch<I>(rows: I) -> BatchOutcome
where
    I: IntoIterator<Item = Value>,
{
    let mut outcome = BatchOutcome::default();

    for (index, row) in rows.into_iter().enumerate() {
        let position = index + 1;
        match validate_create(&row) {
            Ok(fields) => outcome.accepted.push(AcceptedRow { position, fields }),
            Err(errors) => outcome.rejected.push(RejectedRow {
                position,
                label: row_label(&row, position),
                errors,
            }),
        }
    }

    outcome
}

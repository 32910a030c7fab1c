//! Validation and normalization pipeline
//!
//! Loosely-typed input (an HTTP body, a spreadsheet row, a form) is run
//! through a per-field rule table: type checks on the raw value, then
//! filters that coerce it, then validators on the coerced value. Every
//! field is checked in one pass and all failures are reported together.
//!
//! The pipeline is pure: no I/O, no persistence, no identity.

pub mod batch;
pub mod config;
pub mod extractor;
pub mod filters;
pub mod report;
pub mod validators;

pub use batch::{AcceptedRow, BatchOutcome, RejectedRow, validate_batch};
pub use config::{FieldRule, Operation, SiteValidationConfig};
pub use extractor::Validated;
pub use report::FieldErrors;

use crate::core::site::{SiteFields, SitePatch};
use serde_json::Value;

/// Validate a complete candidate record
///
/// Absent fields default to null; only a missing or blank `site` is an error.
pub fn validate_create(input: &Value) -> Result<SiteFields, FieldErrors> {
    let patch = SiteValidationConfig::for_operation(Operation::Create).validate_and_filter(input)?;
    SiteFields::from_patch(&patch).ok_or_else(|| {
        let mut errors = FieldErrors::default();
        errors.push("site", validators::SITE_REQUIRED);
        errors
    })
}

/// Validate a partial record; only fields present in the input are returned
pub fn validate_update(input: &Value) -> Result<SitePatch, FieldErrors> {
    SiteValidationConfig::for_operation(Operation::Update).validate_and_filter(input)
}

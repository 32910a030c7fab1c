//! Field rule table and the routine that interprets it

use super::report::FieldErrors;
use super::{filters, validators};
use crate::core::field::{FieldKind, FieldValue, SiteField};
use crate::core::site::SitePatch;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Checks a value, returning the message to report on failure
pub type Validator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Coerces a value
pub type Filter = Arc<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

static NULL: Value = Value::Null;

/// Which validation mode to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Complete record: absent fields are validated as null and defaulted
    Create,
    /// Partial record: absent fields are skipped
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.write_str("create"),
            Operation::Update => f.write_str("update"),
        }
    }
}

/// How one field is checked and coerced
///
/// `accepts` run against the raw value; if any fails, the field's messages are
/// reported and coercion is skipped. Otherwise `filters` run in order and
/// `validators` check the coerced value.
#[derive(Clone)]
pub struct FieldRule {
    pub field: SiteField,
    pub accepts: Vec<Validator>,
    pub filters: Vec<Filter>,
    pub validators: Vec<Validator>,
}

impl FieldRule {
    /// The default rule for a field, derived from its kind
    pub fn for_field(field: SiteField) -> Self {
        let mut rule = Self {
            field,
            accepts: Vec::new(),
            filters: Vec::new(),
            validators: Vec::new(),
        };

        match field.kind() {
            FieldKind::RequiredText => {
                rule.accepts.push(Arc::new(validators::string_or_null()));
                rule.filters.push(Arc::new(filters::trim()));
                rule.filters.push(Arc::new(filters::empty_to_null()));
                rule.validators
                    .push(Arc::new(validators::required(validators::SITE_REQUIRED)));
            }
            FieldKind::Text => {
                rule.accepts.push(Arc::new(validators::string_or_null()));
                rule.filters.push(Arc::new(filters::trim()));
                rule.filters.push(Arc::new(filters::empty_to_null()));
            }
            FieldKind::Flag => {
                rule.accepts.push(Arc::new(validators::scalar_or_null()));
                rule.filters.push(Arc::new(filters::number_to_text()));
                rule.filters.push(Arc::new(filters::trim()));
                rule.filters.push(Arc::new(filters::empty_to_null()));
            }
            FieldKind::Count => {
                rule.filters.push(Arc::new(filters::number_or_null()));
            }
        }

        rule
    }

    /// Run this rule against a raw value
    fn apply(&self, raw: &Value) -> Result<FieldValue, Vec<String>> {
        let name = self.field.as_str();

        let rejected: Vec<String> = self
            .accepts
            .iter()
            .filter_map(|check| check(name, raw).err())
            .collect();
        if !rejected.is_empty() {
            return Err(rejected);
        }

        let mut value = raw.clone();
        for filter in &self.filters {
            value = filter(name, value).map_err(|e| vec![e.to_string()])?;
        }

        let failed: Vec<String> = self
            .validators
            .iter()
            .filter_map(|check| check(name, &value).err())
            .collect();
        if !failed.is_empty() {
            return Err(failed);
        }

        Ok(FieldValue::from(&value))
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("accepts", &self.accepts.len())
            .field("filters", &self.filters.len())
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// The rule table for one operation
#[derive(Debug, Clone)]
pub struct SiteValidationConfig {
    operation: Operation,
    rules: Vec<FieldRule>,
}

impl SiteValidationConfig {
    /// Rule table covering every site field
    pub fn for_operation(operation: Operation) -> Self {
        Self {
            operation,
            rules: SiteField::ALL.iter().map(|f| FieldRule::for_field(*f)).collect(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Replace the rule for a field
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        match self.rules.iter_mut().find(|r| r.field == rule.field) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// Validate and coerce a payload against the table
    ///
    /// Keys that are not site fields are ignored. On create every field ends
    /// up in the patch; on update only the keys present in the payload do.
    pub fn validate_and_filter(&self, payload: &Value) -> Result<SitePatch, FieldErrors> {
        let mut errors = FieldErrors::default();

        let Some(object) = payload.as_object() else {
            errors.push_form(format!(
                "Expected object, received {}",
                validators::type_name(payload)
            ));
            return Err(errors);
        };

        let mut patch = SitePatch::new();
        for rule in &self.rules {
            let name = rule.field.as_str();
            let raw = match (object.get(name), self.operation) {
                (Some(raw), _) => raw,
                (None, Operation::Create) => &NULL,
                (None, Operation::Update) => continue,
            };

            match rule.apply(raw) {
                Ok(value) => patch.insert(rule.field, value),
                Err(messages) => {
                    for message in messages {
                        errors.push(name, message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

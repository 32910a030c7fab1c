//! Axum extractor for validated site payloads
//!
//! This module provides the `Validated` extractor that runs request bodies
//! through the site rule table before they reach handlers.

use super::config::{Operation, SiteValidationConfig};
use super::report::FieldErrors;
use super::validators;
use crate::core::error::{DashboardError, ValidationError};
use crate::core::site::{SiteFields, SitePatch};
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::Method,
};
use serde_json::Value;

/// Axum extractor that validates and normalizes a site payload
///
/// The operation follows the HTTP method: `POST` validates a complete record,
/// `PUT`/`PATCH` a partial one.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn update_site(
///     Path(id): Path<String>,
///     Validated { patch, .. }: Validated,
/// ) -> DashboardResult<Json<Value>> {
///     // patch only holds the fields the client sent, already normalized
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validated {
    pub operation: Operation,
    pub patch: SitePatch,
}

impl Validated {
    /// Operation implied by an HTTP method
    pub fn operation_for(method: &Method) -> Operation {
        if method == Method::PUT || method == Method::PATCH {
            Operation::Update
        } else {
            Operation::Create
        }
    }

    /// The complete record of a create payload
    pub fn into_fields(self) -> Result<SiteFields, DashboardError> {
        SiteFields::from_patch(&self.patch).ok_or_else(|| {
            let mut errors = FieldErrors::default();
            errors.push("site", validators::SITE_REQUIRED);
            errors.into()
        })
    }
}

impl<S> FromRequest<S> for Validated
where
    S: Send + Sync,
{
    type Rejection = DashboardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = Self::operation_for(req.method());

        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            DashboardError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        let patch = SiteValidationConfig::for_operation(operation).validate_and_filter(&payload)?;
        Ok(Self { operation, patch })
    }
}

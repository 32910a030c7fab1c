//! Typed error handling for sitedesk
//!
//! # Error Categories
//!
//! - [`SiteError`]: Errors related to site record operations (CRUD)
//! - [`ValidationError`]: Errors related to input validation
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//! - [`StorageError`]: Errors related to storage backends
//! - [`RequestError`]: Errors related to HTTP requests
//!
//! Every category maps to an HTTP status and a stable error code, so handlers
//! can return `DashboardResult<T>` and let [`IntoResponse`] do the rest.

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for sitedesk
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Site-related errors (CRUD operations)
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Site(e) => e.status_code(),
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Request(e) => e.status_code(),
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Site(e) => e.error_code(),
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Request(e) => e.error_code(),
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Site(SiteError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            DashboardError::Validation(ValidationError::Fields(errors)) => {
                serde_json::to_value(errors).ok()
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DashboardError>() {
            Ok(typed) => typed,
            Err(err) => match err.downcast::<StorageError>() {
                Ok(storage) => DashboardError::Storage(storage),
                Err(err) => DashboardError::Internal(err.to_string()),
            },
        }
    }
}

// =============================================================================
// Site Errors
// =============================================================================

/// Errors related to site record operations
#[derive(Debug, Error)]
pub enum SiteError {
    /// Record was not found
    #[error("site with id '{id}' not found")]
    NotFound { id: Uuid },
}

impl SiteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SiteError::NotFound { .. } => "SITE_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed their rules; carries every message
    #[error("Validation failed: {0}")]
    Fields(FieldErrors),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

impl From<FieldErrors> for ValidationError {
    fn from(errors: FieldErrors) -> Self {
        ValidationError::Fields(errors)
    }
}

impl From<FieldErrors> for DashboardError {
    fn from(errors: FieldErrors) -> Self {
        DashboardError::Validation(ValidationError::Fields(errors))
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration{}: {message}", .file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration value is invalid
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lock guarding in-process state was poisoned
    #[error("{backend} lock poisoned: {message}")]
    LockPoisoned { backend: String, message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid record ID format
    #[error("Invalid site ID format: {id}")]
    InvalidSiteId { id: String },

    /// Invalid query string
    #[error("Invalid query parameter '{param}': {message}")]
    InvalidQuery { param: String, message: String },

    /// Unauthorized request
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidSiteId { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidSiteId { .. } => "INVALID_SITE_ID",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for sitedesk operations
pub type DashboardResult<T> = Result<T, DashboardError>;

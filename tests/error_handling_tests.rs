//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::http::StatusCode;
use axum::response::IntoResponse;
use sitedesk::core::error::{
    ConfigError, RequestError, SiteError, StorageError, ValidationError,
};
use sitedesk::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_site_not_found_returns_404() {
        let err = DashboardError::Site(SiteError::NotFound { id: Uuid::new_v4() });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_errors_return_400() {
        let err = DashboardError::Validation(ValidationError::InvalidJson {
            message: "EOF".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: DashboardError = FieldErrors::default().into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_request_errors() {
        let cases = [
            (
                RequestError::InvalidSiteId { id: "x".to_string() },
                StatusCode::BAD_REQUEST,
            ),
            (
                RequestError::InvalidQuery {
                    param: "sort".to_string(),
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RequestError::Unauthorized {
                    message: "no token".to_string(),
                },
                StatusCode::UNAUTHORIZED,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(DashboardError::Request(err).status_code(), status);
        }
    }

    #[test]
    fn test_server_side_errors_return_500() {
        let storage = DashboardError::Storage(StorageError::LockPoisoned {
            backend: "in-memory".to_string(),
            message: "poisoned".to_string(),
        });
        let config = DashboardError::Config(ConfigError::FileNotFound {
            path: "sitedesk.yaml".to_string(),
        });
        let internal = DashboardError::Internal("boom".to_string());

        for err in [storage, config, internal] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let not_found: DashboardError = SiteError::NotFound { id: Uuid::nil() }.into();
        assert_eq!(not_found.error_code(), "SITE_NOT_FOUND");

        let invalid_id: DashboardError = RequestError::InvalidSiteId {
            id: "x".to_string(),
        }
        .into();
        assert_eq!(invalid_id.error_code(), "INVALID_SITE_ID");

        let fields: DashboardError = FieldErrors::default().into();
        assert_eq!(fields.error_code(), "VALIDATION_ERROR");

        let storage: DashboardError = StorageError::LockPoisoned {
            backend: "in-memory".to_string(),
            message: "poisoned".to_string(),
        }
        .into();
        assert_eq!(storage.error_code(), "STORAGE_ERROR");
    }
}

// =============================================================================
// Response Format Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_not_found_details_carry_id() {
        let id = Uuid::new_v4();
        let response = DashboardError::Site(SiteError::NotFound { id }).to_response();

        assert_eq!(response.code, "SITE_NOT_FOUND");
        assert!(response.message.contains(&id.to_string()));
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "id": id.to_string() }))
        );
    }

    #[test]
    fn test_validation_details_use_form_and_field_errors() {
        let errors = validate_create(&serde_json::json!({ "url": 7 })).unwrap_err();
        let response = DashboardError::from(errors).to_response();

        let details = response.details.expect("validation errors carry details");
        assert_eq!(details["formErrors"], serde_json::json!([]));
        assert_eq!(details["fieldErrors"]["site"][0], "Site name is required");
        assert_eq!(
            details["fieldErrors"]["url"][0],
            "Expected string, received number"
        );
    }

    #[test]
    fn test_other_errors_have_no_details() {
        let response = DashboardError::Internal("boom".to_string()).to_response();
        assert!(response.details.is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = DashboardError::Request(RequestError::Unauthorized {
            message: "authentication required".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_anyhow_plain_message_becomes_internal() {
        let err: DashboardError = anyhow::anyhow!("something odd").into();
        assert!(matches!(err, DashboardError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_anyhow_wrapping_site_error_is_recovered() {
        let err: DashboardError =
            anyhow::Error::new(DashboardError::from(SiteError::NotFound { id: Uuid::nil() }))
                .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_config_error_in_anyhow_can_be_downcast() {
        let err = DashboardConfig::from_yaml_str("server: [").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}

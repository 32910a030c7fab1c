//! REST surface for site records

pub mod handlers;

pub use handlers::{create_site, delete_site, get_site, list_sites, site_stats, update_site};

use crate::core::auth::{AuthContext, AuthPolicy, AuthProvider};
use crate::core::error::{DashboardError, RequestError};
use crate::core::query::SiteOrder;
use crate::core::service::SiteService;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn SiteService>,
    pub auth: Arc<dyn AuthProvider>,
    pub policy: AuthPolicy,
    /// Listing order when a request gives none
    pub default_order: SiteOrder,
}

/// The caller, once the auth policy has admitted them
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

impl CurrentUser {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.user_id()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = DashboardError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let context = state.auth.extract_context(&parts.headers).await?;

        if !state.policy.check(&context) {
            return Err(RequestError::Unauthorized {
                message: "authentication required".to_string(),
            }
            .into());
        }

        Ok(Self(context))
    }
}

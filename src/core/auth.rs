//! Authorization for sitedesk
//!
//! The dashboard only needs one fact from its identity layer: who the current
//! user is, if anyone. Providers turn request headers into an [`AuthContext`];
//! policies decide whether that context may proceed.

use anyhow::Result;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated staff member
    User { user_id: Uuid },

    /// No authentication
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::User { .. })
    }
}

/// Authorization policy for an operation
///
/// Spelled `public` or `authenticated` in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    #[default]
    Authenticated,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.is_authenticated(),
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from HTTP request headers
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext>;
}

/// Default no-auth provider: every request is anonymous
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext> {
        Ok(AuthContext::Anonymous)
    }
}

/// Provider resolving `Authorization: Bearer <token>` against a fixed table
///
/// Tokens are issued elsewhere; this provider only maps them to user ids.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthProvider {
    tokens: HashMap<String, Uuid>,
}

impl StaticTokenAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for a user
    pub fn with_token(mut self, token: impl Into<String>, user_id: Uuid) -> Self {
        self.tokens.insert(token.into(), user_id);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn bearer(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
    }
}

impl FromIterator<(String, Uuid)> for StaticTokenAuthProvider {
    fn from_iter<I: IntoIterator<Item = (String, Uuid)>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let context = Self::bearer(headers)
            .and_then(|token| self.tokens.get(token))
            .map(|user_id| AuthContext::User { user_id: *user_id })
            .unwrap_or(AuthContext::Anonymous);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_policy_check() {
        let user_context = AuthContext::User {
            user_id: Uuid::new_v4(),
        };

        assert!(AuthPolicy::Authenticated.check(&user_context));
        assert!(AuthPolicy::Public.check(&user_context));

        let anon_context = AuthContext::Anonymous;
        assert!(AuthPolicy::Public.check(&anon_context));
        assert!(!AuthPolicy::Authenticated.check(&anon_context));
    }

    #[test]
    fn test_policy_deserialize() {
        let policy: AuthPolicy = serde_json::from_str("\"public\"").unwrap();
        assert_eq!(policy, AuthPolicy::Public);
        let policy: AuthPolicy = serde_json::from_str("\"authenticated\"").unwrap();
        assert_eq!(policy, AuthPolicy::Authenticated);
        assert!(serde_json::from_str::<AuthPolicy>("\"publc\"").is_err());
        assert_eq!(AuthPolicy::default(), AuthPolicy::Authenticated);
    }

    #[test]
    fn test_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(AuthContext::User { user_id: id }.user_id(), Some(id));
        assert_eq!(AuthContext::Anonymous.user_id(), None);
    }

    #[tokio::test]
    async fn test_no_auth_provider_is_anonymous() {
        let ctx = NoAuthProvider
            .extract_context(&headers_with("Bearer anything"))
            .await
            .unwrap();
        assert_eq!(ctx, AuthContext::Anonymous);
    }

    #[tokio::test]
    async fn test_static_token_known() {
        let user_id = Uuid::new_v4();
        let provider = StaticTokenAuthProvider::new().with_token("s3cret-token-value", user_id);

        let ctx = provider
            .extract_context(&headers_with("Bearer s3cret-token-value"))
            .await
            .unwrap();
        assert_eq!(ctx, AuthContext::User { user_id });
    }

    #[tokio::test]
    async fn test_static_token_unknown_or_missing() {
        let provider = StaticTokenAuthProvider::new().with_token("s3cret-token-value", Uuid::new_v4());

        let ctx = provider
            .extract_context(&headers_with("Bearer other"))
            .await
            .unwrap();
        assert_eq!(ctx, AuthContext::Anonymous);

        let ctx = provider
            .extract_context(&headers_with("Basic s3cret-token-value"))
            .await
            .unwrap();
        assert_eq!(ctx, AuthContext::Anonymous);

        let ctx = provider.extract_context(&HeaderMap::new()).await.unwrap();
        assert_eq!(ctx, AuthContext::Anonymous);
    }
}

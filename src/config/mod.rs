//! Configuration loading and management

use crate::core::auth::{AuthPolicy, AuthProvider, NoAuthProvider, StaticTokenAuthProvider};
use crate::core::error::{ConfigError, RequestError};
use crate::core::field::SiteField;
use crate::core::query::SiteOrder;
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// A bearer token accepted by the API
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthToken {
    #[validate(length(min = 16, message = "token must be at least 16 characters"))]
    pub token: String,

    pub user_id: Uuid,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuthConfig {
    /// `authenticated` (default) or `public`
    pub policy: AuthPolicy,

    #[validate(nested)]
    pub tokens: Vec<AuthToken>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            policy: AuthPolicy::Authenticated,
            tokens: Vec::new(),
        }
    }
}

/// Spreadsheet import settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Column title → field name, on top of the built-in mapping
    pub headers: IndexMap<String, String>,
}

/// Table listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Order used when a request gives none
    pub default_sort: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: SiteOrder::default().to_string(),
        }
    }
}

/// Complete configuration for the dashboard
///
/// # Example
///
/// ```yaml
/// server:
///   bind: 0.0.0.0:8080
/// auth:
///   tokens:
///     - token: 0123456789abcdef0123
///       user_id: 6f1c0e6a-3b7e-4c1e-9a55-0d6a7a1e2b3c
/// import:
///   headers:
///     Website: url
/// listing:
///   default_sort: views_90d:desc
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,

    #[validate(nested)]
    pub auth: AuthConfig,

    pub import: ImportConfig,

    pub listing: ListingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate_all()?;
        Ok(config)
    }

    /// Check every value that serde alone cannot
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| ConfigError::InvalidValue {
            field: "auth.tokens".to_string(),
            message: e.to_string(),
        })?;

        self.bind_addr()?;
        self.default_order()?;

        for (header, field) in &self.import.headers {
            field
                .parse::<SiteField>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: format!("import.headers.{}", header),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                message: e.to_string(),
            })
    }

    pub fn default_order(&self) -> Result<SiteOrder, ConfigError> {
        self.listing
            .default_sort
            .parse()
            .map_err(|e: RequestError| ConfigError::InvalidValue {
                field: "listing.default_sort".to_string(),
                message: e.to_string(),
            })
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        self.auth.policy
    }

    /// Auth provider for the configured tokens; with none, every request is anonymous
    pub fn auth_provider(&self) -> Arc<dyn AuthProvider> {
        if self.auth.tokens.is_empty() {
            return Arc::new(NoAuthProvider);
        }

        Arc::new(
            self.auth
                .tokens
                .iter()
                .map(|t| (t.token.clone(), t.user_id))
                .collect::<StaticTokenAuthProvider>(),
        )
    }
}

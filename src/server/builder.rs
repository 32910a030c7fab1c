//! ServerBuilder for fluent API to build the dashboard server

use super::router::{build_site_routes, health_routes};
use crate::config::DashboardConfig;
use crate::core::auth::AuthProvider;
use crate::core::service::SiteService;
use crate::sites::AppState;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_site_service(InMemorySiteService::new())
///     .with_config(DashboardConfig::from_yaml_file("sitedesk.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    site_service: Option<Arc<dyn SiteService>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    config: DashboardConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            site_service: None,
            auth_provider: None,
            config: DashboardConfig::default(),
        }
    }

    /// Set the site service (required)
    pub fn with_site_service(mut self, service: impl SiteService + 'static) -> Self {
        self.site_service = Some(Arc::new(service));
        self
    }

    /// Same as [`with_site_service`](Self::with_site_service), for an already shared service
    pub fn with_shared_site_service(mut self, service: Arc<dyn SiteService>) -> Self {
        self.site_service = Some(service);
        self
    }

    /// Override the auth provider derived from the configuration
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Shared handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        let service = self.site_service.take().ok_or_else(|| {
            anyhow::anyhow!("SiteService is required. Call .with_site_service()")
        })?;

        let auth = self
            .auth_provider
            .take()
            .unwrap_or_else(|| self.config.auth_provider());

        Ok(AppState {
            service,
            auth,
            policy: self.config.auth_policy(),
            default_order: self.config.default_order()?,
        })
    }

    /// Build the final router: health checks plus the site API, with request tracing
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        Ok(health_routes()
            .merge(build_site_routes(state))
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve on the configured address with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

//! Router assembly for the dashboard API

use crate::sites::{
    AppState, create_site, delete_site, get_site, list_sites, site_stats, update_site,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build site routes
///
/// - GET /api/sites - List sites (search, server, premium_only, sort)
/// - POST /api/sites - Create a site
/// - GET /api/sites/stats - Dashboard counters
/// - GET /api/sites/{id} - Get a site
/// - PATCH /api/sites/{id} - Update the fields present in the body
/// - DELETE /api/sites/{id} - Delete a site
pub fn build_site_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/sites", get(list_sites).post(create_site))
        .route("/api/sites/stats", get(site_stats))
        .route(
            "/api/sites/{id}",
            get(get_site).patch(update_site).delete(delete_site),
        )
        .with_state(state)
}

/// Build health check routes; these never require auth
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sitedesk"
    }))
}

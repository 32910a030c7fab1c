//! HTTP handlers for site operations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

use super::{AppState, CurrentUser};
use crate::core::error::{DashboardResult, RequestError, SiteError};
use crate::core::query::SiteQuery;
use crate::core::stats::SiteStats;
use crate::core::validation::Validated;

fn parse_id(id: &str) -> Result<Uuid, RequestError> {
    Uuid::parse_str(id).map_err(|_| RequestError::InvalidSiteId { id: id.to_string() })
}

/// List sites, filtered and ordered by the query string
pub async fn list_sites(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<SiteQuery>,
) -> DashboardResult<Json<Value>> {
    let order = query.order(state.default_order)?;
    let sites = query.filter(state.service.list(&order).await?);

    Ok(Json(json!({ "data": sites })))
}

/// Create a site from a complete payload
pub async fn create_site(
    State(state): State<AppState>,
    user: CurrentUser,
    validated: Validated,
) -> DashboardResult<(StatusCode, Json<Value>)> {
    let fields = validated.into_fields()?;
    let site = state.service.insert(fields, user.user_id()).await?;

    tracing::debug!(id = %site.id, site = %site.name(), "Site created");

    Ok((StatusCode::CREATED, Json(json!({ "data": site }))))
}

pub async fn get_site(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> DashboardResult<Json<Value>> {
    let id = parse_id(&id)?;
    let site = state
        .service
        .get(&id)
        .await?
        .ok_or(SiteError::NotFound { id })?;

    Ok(Json(json!({ "data": site })))
}

/// Apply the fields present in the body; absent fields are untouched
pub async fn update_site(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Validated { patch, .. }: Validated,
) -> DashboardResult<Json<Value>> {
    let id = parse_id(&id)?;
    let changed = patch.len();
    let site = state
        .service
        .update(&id, patch)
        .await?
        .ok_or(SiteError::NotFound { id })?;

    tracing::debug!(%id, fields = changed, "Site updated");

    Ok(Json(json!({ "data": site })))
}

pub async fn delete_site(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> DashboardResult<Json<Value>> {
    let id = parse_id(&id)?;
    if !state.service.delete(&id).await? {
        return Err(SiteError::NotFound { id }.into());
    }

    tracing::debug!(%id, "Site deleted");

    Ok(Json(json!({ "ok": true })))
}

/// Dashboard counters over every site
pub async fn site_stats(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> DashboardResult<Json<Value>> {
    let sites = state.service.list(&state.default_order).await?;

    Ok(Json(json!({ "data": SiteStats::collect(&sites) })))
}

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{CreatedResponse, DashboardDto, StatusResponse};
use super::validation::validate_id;
use super::{ApiError, AppState};

/// Create and update share one body: update is a full-field replace,
/// so a partial payload fails deserialization upstream.
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub utilisateur_id: i32,
    pub liste_de_dashboards: String,
}

pub async fn list_dashboards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DashboardDto>>, ApiError> {
    let rows = state.store().list_dashboards(None).await?;
    Ok(Json(rows.into_iter().map(DashboardDto::from).collect()))
}

/// GET /api/dashboards/{utilisateur_id}: an owner filter, not a row lookup.
pub async fn list_dashboards_for_user(
    State(state): State<Arc<AppState>>,
    Path(utilisateur_id): Path<i32>,
) -> Result<Json<Vec<DashboardDto>>, ApiError> {
    validate_id(utilisateur_id, "utilisateur_id")?;
    let rows = state.store().list_dashboards(Some(utilisateur_id)).await?;
    Ok(Json(rows.into_iter().map(DashboardDto::from).collect()))
}

pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<DashboardRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_id(payload.utilisateur_id, "utilisateur_id")?;

    if state
        .store()
        .get_user_by_id(payload.utilisateur_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation(format!(
            "Unknown utilisateur_id: {}",
            payload.utilisateur_id
        )));
    }

    let id = state
        .store()
        .create_dashboard(payload.utilisateur_id, &payload.liste_de_dashboards)
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<DashboardRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "dashboard id")?;
    validate_id(payload.utilisateur_id, "utilisateur_id")?;

    if state
        .store()
        .get_user_by_id(payload.utilisateur_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation(format!(
            "Unknown utilisateur_id: {}",
            payload.utilisateur_id
        )));
    }

    let updated = state
        .store()
        .update_dashboard(id, payload.utilisateur_id, &payload.liste_de_dashboards)
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Dashboard", id))
    }
}

pub async fn delete_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "dashboard id")?;

    if state.store().dashboard_has_tasks(id).await? {
        return Err(ApiError::conflict(format!(
            "Dashboard {id} still has production tasks"
        )));
    }

    if state.store().delete_dashboard(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Dashboard", id))
    }
}

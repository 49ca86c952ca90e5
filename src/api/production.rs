use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{CreatedResponse, HistoriqueProductionDto, StatusResponse, TacheProductionDto};
use super::validation::{validate_id, validate_required_text};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct HistoriqueRequest {
    pub enregistrements: String,
    pub utilisateur_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct TacheRequest {
    pub description: String,
    pub statut: String,
    pub priorite: i32,
    pub dashboard_id: i32,
}

pub async fn list_histories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoriqueProductionDto>>, ApiError> {
    let rows = state.store().list_histories(None).await?;
    Ok(Json(
        rows.into_iter().map(HistoriqueProductionDto::from).collect(),
    ))
}

pub async fn list_histories_for_user(
    State(state): State<Arc<AppState>>,
    Path(utilisateur_id): Path<i32>,
) -> Result<Json<Vec<HistoriqueProductionDto>>, ApiError> {
    validate_id(utilisateur_id, "utilisateur_id")?;
    let rows = state.store().list_histories(Some(utilisateur_id)).await?;
    Ok(Json(
        rows.into_iter().map(HistoriqueProductionDto::from).collect(),
    ))
}

pub async fn create_history(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<HistoriqueRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_history(&state, &payload).await?;

    let id = state
        .store()
        .create_history(&payload.enregistrements, payload.utilisateur_id)
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<HistoriqueRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "history id")?;
    validate_history(&state, &payload).await?;

    let updated = state
        .store()
        .update_history(id, &payload.enregistrements, payload.utilisateur_id)
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Production history", id))
    }
}

pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "history id")?;

    if state.store().delete_history(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Production history", id))
    }
}

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TacheProductionDto>>, ApiError> {
    let rows = state.store().list_tasks(None).await?;
    Ok(Json(rows.into_iter().map(TacheProductionDto::from).collect()))
}

pub async fn list_tasks_for_dashboard(
    State(state): State<Arc<AppState>>,
    Path(dashboard_id): Path<i32>,
) -> Result<Json<Vec<TacheProductionDto>>, ApiError> {
    validate_id(dashboard_id, "dashboard_id")?;
    let rows = state.store().list_tasks(Some(dashboard_id)).await?;
    Ok(Json(rows.into_iter().map(TacheProductionDto::from).collect()))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TacheRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_task(&state, &payload).await?;

    let id = state
        .store()
        .create_task(
            &payload.description,
            &payload.statut,
            payload.priorite,
            payload.dashboard_id,
        )
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<TacheRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "task id")?;
    validate_task(&state, &payload).await?;

    let updated = state
        .store()
        .update_task(
            id,
            &payload.description,
            &payload.statut,
            payload.priorite,
            payload.dashboard_id,
        )
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Production task", id))
    }
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "task id")?;

    if state.store().delete_task(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Production task", id))
    }
}

async fn validate_history(
    state: &Arc<AppState>,
    payload: &HistoriqueRequest,
) -> Result<(), ApiError> {
    validate_required_text(&payload.enregistrements, "enregistrements")?;
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

    Ok(())
}

async fn validate_task(state: &Arc<AppState>, payload: &TacheRequest) -> Result<(), ApiError> {
    validate_required_text(&payload.description, "description")?;
    validate_required_text(&payload.statut, "statut")?;
    validate_id(payload.dashboard_id, "dashboard_id")?;

    if payload.priorite < 0 {
        return Err(ApiError::validation("priorite must not be negative"));
    }

    if state.store().get_dashboard(payload.dashboard_id).await?.is_none() {
        return Err(ApiError::validation(format!(
            "Unknown dashboard_id: {}",
            payload.dashboard_id
        )));
    }

    Ok(())
}

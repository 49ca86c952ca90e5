use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{AlerteDto, CreatedResponse, StatusResponse};
use super::validation::{parse_datetime, validate_id, validate_required_text};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateAlerteRequest {
    pub type_alerte: String,
    pub message: String,
    pub utilisateur_id: i32,
    /// Producers may timestamp the alert themselves; otherwise the
    /// creation time (UTC) is recorded.
    pub date_heure: Option<String>,
}

/// Only type and message are mutable; owner and timestamp are fixed at
/// creation.
#[derive(Debug, Deserialize)]
pub struct UpdateAlerteRequest {
    pub type_alerte: String,
    pub message: String,
}

pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlerteDto>>, ApiError> {
    let rows = state.store().list_alerts(None).await?;
    Ok(Json(rows.into_iter().map(AlerteDto::from).collect()))
}

pub async fn list_alerts_for_user(
    State(state): State<Arc<AppState>>,
    Path(utilisateur_id): Path<i32>,
) -> Result<Json<Vec<AlerteDto>>, ApiError> {
    validate_id(utilisateur_id, "utilisateur_id")?;
    let rows = state.store().list_alerts(Some(utilisateur_id)).await?;
    Ok(Json(rows.into_iter().map(AlerteDto::from).collect()))
}

pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateAlerteRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_required_text(&payload.type_alerte, "type_alerte")?;
    validate_required_text(&payload.message, "message")?;
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

    let date_heure = payload
        .date_heure
        .as_deref()
        .map(|v| parse_datetime(v, "date_heure"))
        .transpose()?;

    let id = state
        .store()
        .create_alert(
            &payload.type_alerte,
            &payload.message,
            payload.utilisateur_id,
            date_heure,
        )
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateAlerteRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "alert id")?;
    validate_required_text(&payload.type_alerte, "type_alerte")?;
    validate_required_text(&payload.message, "message")?;

    let updated = state
        .store()
        .update_alert(id, &payload.type_alerte, &payload.message)
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Alert", id))
    }
}

pub async fn delete_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "alert id")?;

    if state.store().delete_alert(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Alert", id))
    }
}

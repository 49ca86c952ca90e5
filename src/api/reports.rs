use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{CreatedResponse, RapportDto, StatusResponse};
use super::validation::{parse_datetime, validate_id};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct RapportRequest {
    pub date_debut: String,
    pub date_fin: String,
    pub donnees: String,
    pub utilisateur_id: i32,
}

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RapportDto>>, ApiError> {
    let rows = state.store().list_reports(None).await?;
    Ok(Json(rows.into_iter().map(RapportDto::from).collect()))
}

pub async fn list_reports_for_user(
    State(state): State<Arc<AppState>>,
    Path(utilisateur_id): Path<i32>,
) -> Result<Json<Vec<RapportDto>>, ApiError> {
    validate_id(utilisateur_id, "utilisateur_id")?;
    let rows = state.store().list_reports(Some(utilisateur_id)).await?;
    Ok(Json(rows.into_iter().map(RapportDto::from).collect()))
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RapportRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let (date_debut, date_fin) = validate_period(&state, &payload).await?;

    let id = state
        .store()
        .create_report(date_debut, date_fin, &payload.donnees, payload.utilisateur_id)
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<RapportRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "report id")?;
    let (date_debut, date_fin) = validate_period(&state, &payload).await?;

    let updated = state
        .store()
        .update_report(
            id,
            date_debut,
            date_fin,
            &payload.donnees,
            payload.utilisateur_id,
        )
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Report", id))
    }
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "report id")?;

    if state.store().delete_report(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Report", id))
    }
}

async fn validate_period(
    state: &Arc<AppState>,
    payload: &RapportRequest,
) -> Result<(chrono::NaiveDateTime, chrono::NaiveDateTime), ApiError> {
    validate_id(payload.utilisateur_id, "utilisateur_id")?;

    let date_debut = parse_datetime(&payload.date_debut, "date_debut")?;
    let date_fin = parse_datetime(&payload.date_fin, "date_fin")?;

    if date_fin < date_debut {
        return Err(ApiError::validation("date_fin must not precede date_debut"));
    }

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

    Ok((date_debut, date_fin))
}

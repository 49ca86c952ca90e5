use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{
    CreatedResponse, StatistiquesProductionDto, StatusResponse, TendanceAnomalieDto,
};
use super::validation::{parse_date, validate_id, validate_required_text};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct StatistiquesRequest {
    pub date: String,
    pub sous_production: i32,
    pub surproduction: i32,
    pub production_normale: i32,
}

#[derive(Debug, Deserialize)]
pub struct TendanceRequest {
    pub date: String,
    pub anomalie: String,
    pub nombre_occurrences: i32,
}

pub async fn list_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatistiquesProductionDto>>, ApiError> {
    let rows = state.store().list_production_statistics().await?;
    Ok(Json(
        rows.into_iter()
            .map(StatistiquesProductionDto::from)
            .collect(),
    ))
}

pub async fn create_statistics(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<StatistiquesRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let date = validate_statistics(&payload)?;

    let id = state
        .store()
        .create_production_statistics(
            date,
            payload.sous_production,
            payload.surproduction,
            payload.production_normale,
        )
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_statistics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<StatistiquesRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "statistics id")?;
    let date = validate_statistics(&payload)?;

    let updated = state
        .store()
        .update_production_statistics(
            id,
            date,
            payload.sous_production,
            payload.surproduction,
            payload.production_normale,
        )
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Production statistics", id))
    }
}

pub async fn delete_statistics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "statistics id")?;

    if state.store().delete_production_statistics(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Production statistics", id))
    }
}

pub async fn list_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TendanceAnomalieDto>>, ApiError> {
    let rows = state.store().list_anomaly_trends().await?;
    Ok(Json(rows.into_iter().map(TendanceAnomalieDto::from).collect()))
}

pub async fn create_trend(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TendanceRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let date = validate_trend(&payload)?;

    let id = state
        .store()
        .create_anomaly_trend(date, &payload.anomalie, payload.nombre_occurrences)
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_trend(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<TendanceRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "trend id")?;
    let date = validate_trend(&payload)?;

    let updated = state
        .store()
        .update_anomaly_trend(id, date, &payload.anomalie, payload.nombre_occurrences)
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Anomaly trend", id))
    }
}

pub async fn delete_trend(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "trend id")?;

    if state.store().delete_anomaly_trend(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Anomaly trend", id))
    }
}

fn validate_statistics(payload: &StatistiquesRequest) -> Result<chrono::NaiveDate, ApiError> {
    if payload.sous_production < 0
        || payload.surproduction < 0
        || payload.production_normale < 0
    {
        return Err(ApiError::validation("counters must not be negative"));
    }
    parse_date(&payload.date, "date")
}

fn validate_trend(payload: &TendanceRequest) -> Result<chrono::NaiveDate, ApiError> {
    validate_required_text(&payload.anomalie, "anomalie")?;
    if payload.nombre_occurrences < 0 {
        return Err(ApiError::validation(
            "nombre_occurrences must not be negative",
        ));
    }
    parse_date(&payload.date, "date")
}

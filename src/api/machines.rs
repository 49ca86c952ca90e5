use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{CreatedResponse, PerformanceMachineDto};
use super::validation::{parse_datetime, validate_required_text};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct PerformanceSampleRequest {
    pub machine_id: String,
    pub temps_arret: i32,
    pub temps_fonctionnement: i32,
    #[serde(default)]
    pub date_heure: Option<String>,
}

pub async fn list_machine_performance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PerformanceMachineDto>>, ApiError> {
    let rows = state.store().list_machine_performance().await?;
    Ok(Json(
        rows.into_iter().map(PerformanceMachineDto::from).collect(),
    ))
}

/// Samples are append-only; there is no update or delete on this table.
pub async fn append_machine_performance(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<PerformanceSampleRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_required_text(&payload.machine_id, "machine_id")?;

    if payload.temps_arret < 0 || payload.temps_fonctionnement < 0 {
        return Err(ApiError::validation("durations must not be negative"));
    }

    let date_heure = payload
        .date_heure
        .as_deref()
        .map(|raw| parse_datetime(raw, "date_heure"))
        .transpose()?;

    let id = state
        .store()
        .append_machine_performance(
            &payload.machine_id,
            payload.temps_arret,
            payload.temps_fonctionnement,
            date_heure,
        )
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

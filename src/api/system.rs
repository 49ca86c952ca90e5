use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: &'static str,
    pub listeners: usize,
}

/// Liveness endpoint. A failing store ping surfaces as an error response
/// so load balancers can take the instance out of rotation.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SystemStatus>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|err| ApiError::internal(format!("database ping failed: {err}")))?;

    Ok(Json(SystemStatus {
        status: "success",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime().as_secs(),
        database: "ok",
        listeners: state.hub().listener_count(),
    }))
}

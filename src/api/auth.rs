use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::extract::ApiJson;
use super::types::{LoginResponse, StatusResponse};
use super::{ApiError, AppState};

/// Session key holding the authenticated subject id.
pub const SESSION_USER_KEY: &str = "utilisateur_id";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub nom: String,
    pub mot_de_passe: String,
}

/// POST /api/login
/// Resolves a name/password pair to a subject id. Unknown name and
/// wrong password return the same body so names cannot be enumerated.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.nom.is_empty() {
        return Err(ApiError::validation("nom is required"));
    }
    if payload.mot_de_passe.is_empty() {
        return Err(ApiError::validation("mot_de_passe is required"));
    }

    let utilisateur_id = state
        .store()
        .verify_user_password(&payload.nom, &payload.mot_de_passe)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?
        .ok_or_else(ApiError::invalid_credentials)?;

    session
        .insert(SESSION_USER_KEY, utilisateur_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!("User {} logged in", payload.nom);

    Ok(Json(LoginResponse {
        status: "success",
        utilisateur_id,
    }))
}

/// POST /api/logout
/// Invalidates the current session. A call without an active session
/// is a no-op success.
pub async fn logout(session: Session) -> Result<Json<StatusResponse>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to clear session: {e}")))?;

    Ok(Json(StatusResponse::ok()))
}

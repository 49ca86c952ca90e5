use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{CreatedResponse, RoleDto, StatusResponse, UtilisateurDto};
use super::validation::{validate_id, validate_required_text};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUtilisateurRequest {
    pub nom: String,
    pub mot_de_passe: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UtilisateurDto>>, ApiError> {
    let users = state.store().list_users().await?;
    Ok(Json(users.into_iter().map(UtilisateurDto::from).collect()))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateUtilisateurRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_required_text(&payload.nom, "nom")?;
    validate_required_text(&payload.mot_de_passe, "mot_de_passe")?;

    if state.store().get_user_by_name(&payload.nom).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "User '{}' already exists",
            payload.nom
        )));
    }

    let mut role_ids = Vec::with_capacity(payload.roles.len());
    for name in &payload.roles {
        let role = state
            .store()
            .find_role_by_name(name)
            .await?
            .ok_or_else(|| ApiError::validation(format!("Unknown role: {name}")))?;
        role_ids.push(role.id);
    }

    let config = state.config().read().await.security.clone();
    let id = state
        .store()
        .create_user(&payload.nom, &payload.mot_de_passe, &role_ids, &config)
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

/// DELETE /api/utilisateurs/{id}
/// Refused while owned rows still reference the user; this keeps the
/// store's referential integrity without cascading.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "utilisateur_id")?;

    if state.store().user_has_dependents(id).await? {
        return Err(ApiError::conflict(format!(
            "User {id} still owns dashboards, alerts, reports or histories"
        )));
    }

    if state.store().delete_user(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("User", id))
    }
}

pub async fn list_roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoleDto>>, ApiError> {
    let roles = state.store().list_roles().await?;
    Ok(Json(roles.into_iter().map(RoleDto::from).collect()))
}

pub async fn create_role(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_required_text(&payload.name, "name")?;

    if state.store().find_role_by_name(&payload.name).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "Role '{}' already exists",
            payload.name
        )));
    }

    let id = state
        .store()
        .create_role(&payload.name, payload.description.as_deref())
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{CreatedResponse, ProduitDto, ProduitLookupResponse, StatusResponse};
use super::validation::{validate_id, validate_required_text};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ProduitRequest {
    pub nom: String,
    pub description: String,
    pub tags_rfid: String,
}

/// Lookup endpoint kept deliberately soft: a missing product is reported in
/// the body rather than as a 404, so scanners polling unknown RFID ids do not
/// trip error alarms.
pub async fn lookup_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ProduitLookupResponse>, ApiError> {
    validate_id(id, "product id")?;

    let produit = state
        .store()
        .get_product(id)
        .await?
        .map_or_else(|| "not found".to_string(), |p| p.nom);

    Ok(Json(ProduitLookupResponse::new(produit)))
}

pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProduitDto>>, ApiError> {
    let rows = state.store().list_products().await?;
    Ok(Json(rows.into_iter().map(ProduitDto::from).collect()))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ProduitRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    validate_required_text(&payload.nom, "nom")?;

    let id = state
        .store()
        .create_product(&payload.nom, &payload.description, &payload.tags_rfid)
        .await?;

    Ok(Json(CreatedResponse::new(id)))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ProduitRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "product id")?;
    validate_required_text(&payload.nom, "nom")?;

    let updated = state
        .store()
        .update_product(id, &payload.nom, &payload.description, &payload.tags_rfid)
        .await?;

    if updated {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Product", id))
    }
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_id(id, "product id")?;

    if state.store().delete_product(id).await? {
        Ok(Json(StatusResponse::ok()))
    } else {
        Err(ApiError::not_found("Product", id))
    }
}

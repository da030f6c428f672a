//! Camp type description endpoint handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value as JsonValue;
use tracing::info;

use domain::models::camp::{CampType, CampTypeDescription, UpdateCampTypeDescriptionRequest};
use persistence::repositories::CampRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::CacheKey;

/// List the editable descriptions shown in the homepage offer section.
///
/// GET /api/v1/camp-types
pub async fn list_camp_types(State(state): State<AppState>) -> Result<Json<JsonValue>, ApiError> {
    if let Some(cached) = state.cache.get(&CacheKey::CampTypes) {
        return Ok(Json(cached));
    }

    let repository = CampRepository::new(state.pool.clone());
    let descriptions: Vec<CampTypeDescription> = repository
        .list_type_descriptions()
        .await?
        .into_iter()
        .map(CampTypeDescription::from)
        .collect();

    let body =
        serde_json::to_value(&descriptions).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(CacheKey::CampTypes, body.clone());
    Ok(Json(body))
}

/// Update the label and description for one camp type.
///
/// PUT /api/v1/camp-types/{type}
pub async fn update_camp_type(
    State(state): State<AppState>,
    Path(camp_type): Path<String>,
    Json(request): Json<UpdateCampTypeDescriptionRequest>,
) -> Result<Json<CampTypeDescription>, ApiError> {
    let camp_type: CampType = camp_type
        .parse()
        .map_err(|_| ApiError::validation("Nieprawidłowy typ obozu"))?;

    let repository = CampRepository::new(state.pool.clone());
    let description = repository
        .update_type_description(&camp_type.to_string(), &request)
        .await?
        .map(CampTypeDescription::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono typu obozu".to_string()))?;

    state.cache.invalidate_camp_types();

    info!(camp_type = %camp_type, "Camp type description updated");
    Ok(Json(description))
}

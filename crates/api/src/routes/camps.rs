//! Camp endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::camp::{Camp, CampRequest};
use domain::models::notification::ActivityNotice;
use persistence::repositories::CampRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{audit_operation_error, record_activity};
use crate::services::CacheKey;

/// List camps, soonest start date first.
///
/// GET /api/v1/camps
pub async fn list_camps(State(state): State<AppState>) -> Result<Json<JsonValue>, ApiError> {
    if let Some(cached) = state.cache.get(&CacheKey::Camps) {
        return Ok(Json(cached));
    }

    let repository = CampRepository::new(state.pool.clone());
    let camps: Vec<Camp> = repository
        .list()
        .await?
        .into_iter()
        .map(Camp::from)
        .collect();

    let body = serde_json::to_value(&camps).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(CacheKey::Camps, body.clone());
    Ok(Json(body))
}

/// Get a single camp.
///
/// GET /api/v1/camps/{id}
pub async fn get_camp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JsonValue>, ApiError> {
    if let Some(cached) = state.cache.get(&CacheKey::Camp(id)) {
        return Ok(Json(cached));
    }

    let repository = CampRepository::new(state.pool.clone());
    let camp = repository
        .find_by_id(id)
        .await?
        .map(Camp::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono obozu".to_string()))?;

    let body = serde_json::to_value(&camp).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(CacheKey::Camp(id), body.clone());
    Ok(Json(body))
}

/// Create a camp.
///
/// POST /api/v1/camps
pub async fn create_camp(
    State(state): State<AppState>,
    Json(mut request): Json<CampRequest>,
) -> Result<(StatusCode, Json<Camp>), ApiError> {
    // The registration form leaves the location prefilled; an empty value
    // falls back to the configured default before validation runs.
    if request.location.trim().is_empty() {
        request.location = state.config.portal.default_camp_location.clone();
    }
    request.validate().map_err(ApiError::from)?;

    let repository = CampRepository::new(state.pool.clone());
    let camp = Camp::from(repository.create(&request).await.map_err(|e| {
        audit_operation_error(&state.pool, "database", "create_camp", e.to_string());
        ApiError::from(e)
    })?);

    record_activity(&state.pool, ActivityNotice::camp_created(&camp.name)).await;
    state.cache.invalidate_camps(None);

    info!(camp_id = %camp.id, name = %camp.name, "Camp created");
    Ok((StatusCode::CREATED, Json(camp)))
}

/// Update a camp.
///
/// PUT /api/v1/camps/{id}
pub async fn update_camp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CampRequest>,
) -> Result<Json<Camp>, ApiError> {
    request.validate_for_update().map_err(ApiError::from)?;

    let repository = CampRepository::new(state.pool.clone());
    let camp = repository
        .update(id, &request)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "update_camp", e.to_string());
            ApiError::from(e)
        })?
        .map(Camp::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono obozu".to_string()))?;

    record_activity(&state.pool, ActivityNotice::camp_updated(&camp.name)).await;
    state.cache.invalidate_camps(Some(id));

    info!(camp_id = %camp.id, name = %camp.name, "Camp updated");
    Ok(Json(camp))
}

/// Delete a camp and everything registered for it.
///
/// DELETE /api/v1/camps/{id}
pub async fn delete_camp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repository = CampRepository::new(state.pool.clone());
    let camp = repository
        .delete(id)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "delete_camp", e.to_string());
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono obozu".to_string()))?;

    record_activity(&state.pool, ActivityNotice::camp_deleted(&camp.name)).await;
    // Registrations go with the camp, so both caches are stale now.
    state.cache.invalidate_camps(Some(id));
    state.cache.invalidate_registrations();

    info!(camp_id = %id, name = %camp.name, "Camp deleted");
    Ok(StatusCode::NO_CONTENT)
}

//! Dashboard statistics endpoint handler.

use axum::{extract::State, Json};
use serde_json::Value as JsonValue;

use persistence::repositories::RegistrationRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::CacheKey;

/// Counts shown on the admin dashboard.
///
/// GET /api/v1/stats
pub async fn portal_stats(State(state): State<AppState>) -> Result<Json<JsonValue>, ApiError> {
    if let Some(cached) = state.cache.get(&CacheKey::Stats) {
        return Ok(Json(cached));
    }

    let repository = RegistrationRepository::new(state.pool.clone());
    let stats = repository.portal_stats().await?;

    let body = serde_json::to_value(&stats).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(CacheKey::Stats, body.clone());
    Ok(Json(body))
}

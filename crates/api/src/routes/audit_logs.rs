//! Audit log endpoint handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use domain::models::AuditLog;
use persistence::repositories::AuditLogRepository;

use crate::app::AppState;
use crate::error::ApiError;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub action: Option<String>,
    pub table: Option<String>,
    pub limit: Option<i64>,
}

/// List audit entries, newest first.
///
/// GET /api/v1/audit-logs?action=&table=&limit=
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<Vec<AuditLog>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let repository = AuditLogRepository::new(state.pool.clone());
    let logs: Vec<AuditLog> = repository
        .list(query.action.as_deref(), query.table.as_deref(), limit)
        .await?
        .into_iter()
        .map(AuditLog::from)
        .collect();

    Ok(Json(logs))
}

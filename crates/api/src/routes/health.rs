//! Health check endpoint handlers.
//!
//! The full check at /api/v1/health measures database latency and journals
//! the probe; /live and /ready are cheap endpoints for orchestrators.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

use domain::models::audit_log::CreateAuditLogInput;
use persistence::repositories::AuditLogRepository;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseStatus {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Json<Self> {
        Json(Self {
            status: status.to_string(),
        })
    }
}

/// Outcome of one round trip to the database.
struct DbProbe {
    latency_ms: u64,
    error: Option<String>,
}

impl DbProbe {
    fn connected(&self) -> bool {
        self.error.is_none()
    }
}

async fn probe_database(pool: &PgPool) -> DbProbe {
    let start = Instant::now();
    let error = sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .err()
        .map(|e| e.to_string());

    DbProbe {
        latency_ms: start.elapsed().as_millis() as u64,
        error,
    }
}

/// Full health check endpoint.
///
/// GET /api/v1/health
///
/// Journals every probe to the audit log; the journal write is best-effort
/// and the probe result never depends on it.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let probe = probe_database(&state.pool).await;

    let entry = CreateAuditLogInput::health_check(
        probe.connected(),
        probe.latency_ms as f64,
        probe.error.as_deref(),
    );
    AuditLogRepository::new(state.pool.clone()).create_detached(entry);

    if !probe.connected() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseStatus {
            connected: true,
            latency_ms: Some(probe.latency_ms),
        },
    }))
}

/// Liveness probe endpoint.
///
/// GET /api/v1/health/live
pub async fn live() -> Json<StatusResponse> {
    StatusResponse::new("alive")
}

/// Readiness probe endpoint.
///
/// GET /api/v1/health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    if !probe_database(&state.pool).await.connected() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(StatusResponse::new("ready"))
}

//! Prometheus metrics middleware.
//!
//! Records request counters and latency histograms, and serves the
//! scrape endpoint.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Instant;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Latency buckets in seconds, tuned for a database-backed API.
const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0];

/// Middleware recording `http_requests_total` (method, path, status) and
/// `http_request_duration_seconds` (method, path) per request.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let method = method_label(req.method());
    let path = route_template(&req);
    let start = Instant::now();

    let response = next.run(req).await;

    counter!(
        "http_requests_total",
        "method" => method,
        "path" => path.clone(),
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Bounded set of method labels; anything exotic collapses into `OTHER`.
fn method_label(method: &Method) -> &'static str {
    const TRACKED: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];
    TRACKED
        .iter()
        .find(|&&m| m == method.as_str())
        .copied()
        .unwrap_or("OTHER")
}

/// Route template (`/api/v1/camps/:id` rather than the concrete URL) so the
/// path label stays low-cardinality. Requests that never matched a route
/// fall back to the raw path.
fn route_template(req: &Request<Body>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

/// Counts a public registration submission.
pub fn record_registration_submitted(camp_type: &str) {
    counter!(
        "registrations_submitted_total",
        "camp_type" => camp_type.to_string()
    )
    .increment(1);
}

/// Counts a generated spreadsheet export.
pub fn record_export_generated() {
    counter!("exports_generated_total").increment(1);
}

/// GET /metrics handler, rendering the Prometheus text format.
pub async fn metrics_handler() -> Response {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "Metrics not initialized").into_response(),
    }
}

/// Installs the global Prometheus recorder. Call once at startup, before
/// the first metric is recorded.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .set_buckets(DURATION_BUCKETS)
        .expect("Failed to set histogram buckets")
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        panic!("Prometheus recorder installed twice");
    }
}

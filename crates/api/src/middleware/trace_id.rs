//! Request ID propagation and per-request tracing spans.
//!
//! Every request gets an `X-Request-ID` header (client-provided or generated)
//! that is attached to the tracing span and echoed on the response, so a log
//! line can be tied back to the request that produced it.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Middleware that assigns a request ID and wraps the request in a span.
///
/// The completion log inherits the span fields, so every entry carries the
/// request id, method and path without repeating them.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = correlation_id(&req);
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = async {
        let start = Instant::now();
        let response = next.run(req).await;
        info!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Client-provided correlation ID, or a fresh UUID when absent or empty.
fn correlation_id(req: &Request<Body>) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Reads the request ID from request extensions, if one was assigned.
#[allow(dead_code)] // Available for handlers that log with explicit correlation
pub fn get_request_id(extensions: &axum::http::Extensions) -> Option<String> {
    extensions.get::<RequestId>().map(|id| id.0.clone())
}

//! Response security headers.
//!
//! The portal serves user-uploaded files (registration cards, homepage
//! images) back through the `/uploads` mount, so every response gets a
//! small set of browser hardening headers.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Headers attached to every response.
const BASELINE_HEADERS: [(&str, &str); 4] = [
    // Uploaded files must never be sniffed into a different type
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// Middleware that stamps the baseline headers onto each response.
///
/// `Strict-Transport-Security` is added only when
/// `CAMP__SECURITY__HSTS_ENABLED=true`; it belongs in production behind
/// proper HTTPS termination.
pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in BASELINE_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    if hsts_enabled() {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

fn hsts_enabled() -> bool {
    std::env::var("CAMP__SECURITY__HSTS_ENABLED")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

//! Login rate limiting middleware.
//!
//! Limits login attempts per client address to slow down credential guessing.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use serde_json::json;
use std::{net::SocketAddr, num::NonZeroU32};

use crate::app::AppState;

/// Quota applied when the configured limit is zero or absent.
const FALLBACK_LIMIT_PER_MINUTE: u32 = 10;

/// Per-client login attempt limiter, keyed by resolved client address.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
    limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(limit_per_minute: u32) -> Self {
        let quota = NonZeroU32::new(limit_per_minute)
            .or(NonZeroU32::new(FALLBACK_LIMIT_PER_MINUTE))
            .map(Quota::per_minute)
            .unwrap();

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
            limit_per_minute,
        }
    }

    /// Check if a request from the given client should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if limited.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                Err(wait.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("limit_per_minute", &self.limit_per_minute)
            .field("tracked_clients", &self.limiter.len())
            .finish()
    }
}

/// Resolves the client key for rate limiting.
///
/// Prefers proxy-provided headers so the limiter keys on the real client
/// address when the portal runs behind a reverse proxy.
fn client_key(req: &Request<Body>) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = req.headers().get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if !real_ip.trim().is_empty() {
            return real_ip.trim().to_string();
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Middleware that limits login attempts per client address.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref limiter) = state.login_limiter {
        let key = client_key(&req);
        if let Err(retry_after) = limiter.check(&key) {
            tracing::warn!(client = %key, retry_after, "Login rate limit exceeded");
            return rate_limited_response(retry_after);
        }
    }

    next.run(req).await
}

/// Create a rate limited response with proper headers and body.
fn rate_limited_response(retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limit_exceeded",
        "message": "Zbyt wiele prób logowania. Spróbuj ponownie za chwilę.",
        "retryAfter": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    response.headers_mut().insert(
        header::RETRY_AFTER,
        retry_after.to_string().parse().unwrap(),
    );

    response
}

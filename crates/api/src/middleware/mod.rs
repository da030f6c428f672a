//! HTTP middleware: auth guard, request tracing, metrics, rate limiting
//! and response headers.

pub mod admin_auth;
pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
pub mod trace_id;

pub use admin_auth::{require_admin, AdminAuth};
pub use metrics::{
    init_metrics, metrics_handler, metrics_middleware, record_export_generated,
    record_registration_submitted,
};
pub use rate_limit::{login_rate_limit, RateLimiterState};
pub use security_headers::security_headers_middleware;
pub use trace_id::trace_id;

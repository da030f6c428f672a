use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::{JwtError, JwtKeys};

use crate::config::Config;
use crate::middleware::{
    login_rate_limit, metrics_handler, metrics_middleware, require_admin,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    audit_logs, auth, camp_types, camps, export, health, homepage, notifications,
    registration_cards, registrations, stats, templates,
};
use crate::services::{ResponseCache, StorageService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtKeys>,
    pub cache: Arc<ResponseCache>,
    pub storage: StorageService,
    pub login_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let config = Arc::new(config);

    let jwt = Arc::new(JwtKeys::with_leeway(
        &normalize_pem(&config.jwt.private_key),
        &normalize_pem(&config.jwt.public_key),
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
        config.jwt.leeway_secs,
    )?);

    // Login brute-force limiter, keyed per client IP. 0 disables it.
    let login_limiter = if config.security.login_rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.login_rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        cache: Arc::new(ResponseCache::new(&config.cache)),
        storage: StorageService::new(&config.storage),
        login_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let admin_guard = middleware::from_fn_with_state(state.clone(), require_admin);

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/health/ready", get(health::ready))
        .route("/api/v1/health/live", get(health::live))
        .route("/api/v1/camp-types", get(camp_types::list_camp_types))
        .route("/api/v1/homepage/sections", get(homepage::list_sections))
        .route("/metrics", get(metrics_handler));

    // Auth endpoints; only login carries the per-IP limiter
    let auth_routes = Router::new()
        .route(
            "/api/v1/auth/login",
            post(auth::login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                login_rate_limit,
            )),
        )
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout));

    // Paths that mix public reads with admin writes carry the guard on
    // the write methods only
    let mixed_routes = Router::new()
        .route(
            "/api/v1/camps",
            get(camps::list_camps)
                .merge(post(camps::create_camp).route_layer(admin_guard.clone())),
        )
        .route(
            "/api/v1/camps/:camp_id",
            get(camps::get_camp).merge(
                put(camps::update_camp)
                    .delete(camps::delete_camp)
                    .route_layer(admin_guard.clone()),
            ),
        )
        .route(
            "/api/v1/registrations",
            post(registrations::create_registration).merge(
                get(registrations::list_registrations).route_layer(admin_guard.clone()),
            ),
        );

    // Admin routes (require a valid access token)
    let admin_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        .route(
            "/api/v1/camp-types/:camp_type",
            put(camp_types::update_camp_type),
        )
        .route(
            "/api/v1/registrations/:registration_id",
            get(registrations::get_registration)
                .put(registrations::update_registration)
                .delete(registrations::delete_registration),
        )
        .route(
            "/api/v1/registrations/:registration_id/notes",
            post(registrations::add_note),
        )
        .route(
            "/api/v1/registrations/:registration_id/exclude",
            post(registrations::exclude_registration),
        )
        .route(
            "/api/v1/registrations/:registration_id/payments",
            post(registrations::record_payment),
        )
        .route(
            "/api/v1/registrations/:registration_id/reminder",
            post(registrations::send_payment_reminder),
        )
        .route(
            "/api/v1/registrations/:registration_id/email",
            post(registrations::send_message),
        )
        .route(
            "/api/v1/registrations/:registration_id/card",
            get(registration_cards::get_card)
                .post(registration_cards::upload_card)
                .delete(registration_cards::delete_card),
        )
        .route(
            "/api/v1/registrations/:registration_id/card-data",
            get(registration_cards::get_card_data),
        )
        .route(
            "/api/v1/export/registrations",
            get(export::export_registrations),
        )
        .route(
            "/api/v1/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/api/v1/templates/:template_id",
            put(templates::update_template).delete(templates::delete_template),
        )
        .route(
            "/api/v1/templates/:template_id/generate",
            post(templates::generate_from_template),
        )
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(notifications::mark_notification_read),
        )
        .route("/api/v1/stats", get(stats::portal_stats))
        .route(
            "/api/v1/homepage/sections/all",
            get(homepage::list_all_sections),
        )
        .route(
            "/api/v1/homepage/sections/:section_id",
            put(homepage::update_section),
        )
        .route(
            "/api/v1/homepage/sections/:section_id/images",
            post(homepage::upload_section_image),
        )
        .route(
            "/api/v1/homepage/images/:image_id",
            delete(homepage::delete_section_image),
        )
        .route("/api/v1/audit-logs", get(audit_logs::list_audit_logs))
        // Admin auth runs before any handler in this group
        .route_layer(admin_guard);

    // Merge all routes
    Ok(Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(mixed_routes)
        .merge(admin_routes)
        // Uploaded files are served back under /uploads
        .nest_service("/uploads", ServeDir::new(state.storage.root()))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state))
}

/// PEM material arriving through environment variables often carries
/// literal `\n` sequences and surrounding quotes; undo both.
fn normalize_pem(raw: &str) -> String {
    raw.trim().trim_matches('"').replace("\\n", "\n")
}

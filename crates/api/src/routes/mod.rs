//! HTTP route handlers.

use serde_json::json;
use sqlx::PgPool;
use tracing::warn;

use domain::models::audit_log::CreateAuditLogInput;
use domain::models::notification::ActivityNotice;
use persistence::repositories::{AuditLogRepository, NotificationRepository};

pub mod audit_logs;
pub mod auth;
pub mod camp_types;
pub mod camps;
pub mod export;
pub mod health;
pub mod homepage;
pub mod notifications;
pub mod registration_cards;
pub mod registrations;
pub mod stats;
pub mod templates;

/// Records an admin-facing activity notification.
///
/// Failures are logged and swallowed; the operation that produced the
/// notice has already succeeded.
pub(crate) async fn record_activity(pool: &PgPool, notice: ActivityNotice) {
    let repository = NotificationRepository::new(pool.clone());
    if let Err(e) = repository.record_activity(&notice).await {
        warn!(error = %e, title = %notice.title, "Failed to record activity notification");
    }
}

/// Journals a failed operation into the audit log, off the request path.
pub(crate) fn audit_operation_error(
    pool: &PgPool,
    error_type: &'static str,
    operation: &'static str,
    message: String,
) {
    let input = CreateAuditLogInput::error(
        error_type,
        &message,
        Some(json!({ "operation": operation })),
    );
    AuditLogRepository::new(pool.clone()).create_detached(input);
}

/// Public URL for a stored file, served through the uploads mount.
pub(crate) fn public_file_url(public_base_url: &str, relative_path: &str) -> String {
    format!(
        "{}/uploads/{}",
        public_base_url.trim_end_matches('/'),
        relative_path
    )
}

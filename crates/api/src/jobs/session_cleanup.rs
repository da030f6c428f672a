//! Expired admin session cleanup job.

use persistence::repositories::AdminSessionRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

/// Deletes admin session rows whose expiry has passed.
///
/// Expired sessions are already rejected at authentication time, this
/// job only keeps the table from growing without bound.
pub struct SessionCleanupJob {
    pool: PgPool,
}

impl SessionCleanupJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for SessionCleanupJob {
    fn name(&self) -> &'static str {
        "session_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), String> {
        let sessions = AdminSessionRepository::new(self.pool.clone());

        let deleted = sessions
            .delete_expired()
            .await
            .map_err(|e| format!("Failed to delete expired sessions: {}", e))?;

        if deleted > 0 {
            info!(deleted = deleted, "Removed expired admin sessions");
        }

        Ok(())
    }
}

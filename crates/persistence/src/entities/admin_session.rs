//! Admin session entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the admin_sessions table.
///
/// Sessions store SHA-256 hashes of both token JTIs rather than the
/// tokens themselves, so a database leak does not expose usable
/// credentials. A session is live while `revoked_at` is NULL and
/// `expires_at` is in the future.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSessionEntity {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub access_jti_hash: String,
    pub refresh_jti_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AdminSessionEntity {
    /// Returns true if the session has neither been revoked nor expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

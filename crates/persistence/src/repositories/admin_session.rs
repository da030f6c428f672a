//! Admin session repository.
//!
//! Sessions are looked up by SHA-256 hashes of token JTIs, never by the
//! tokens themselves. Refresh rotation revokes the old row and inserts a
//! replacement inside one transaction so a crashed rotation never leaves
//! both the old and new session live.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::admin_session::AdminSessionEntity;

#[derive(Debug, Clone)]
pub struct AdminSessionRepository {
    pool: PgPool,
}

impl AdminSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new session row for a freshly issued token pair.
    pub async fn create(
        &self,
        admin_id: Uuid,
        access_jti_hash: &str,
        refresh_jti_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<AdminSessionEntity, sqlx::Error> {
        let session = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            INSERT INTO admin_sessions (admin_id, access_jti_hash, refresh_jti_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, admin_id, access_jti_hash, refresh_jti_hash, expires_at, revoked_at, created_at
            "#,
        )
        .bind(admin_id)
        .bind(access_jti_hash)
        .bind(refresh_jti_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Finds a live session by the hash of an access token JTI.
    pub async fn find_active_by_access_jti(
        &self,
        access_jti_hash: &str,
    ) -> Result<Option<AdminSessionEntity>, sqlx::Error> {
        let session = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            SELECT id, admin_id, access_jti_hash, refresh_jti_hash, expires_at, revoked_at, created_at
            FROM admin_sessions
            WHERE access_jti_hash = $1
              AND revoked_at IS NULL
              AND expires_at > NOW()
            "#,
        )
        .bind(access_jti_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Finds a live session by the hash of a refresh token JTI.
    pub async fn find_active_by_refresh_jti(
        &self,
        refresh_jti_hash: &str,
    ) -> Result<Option<AdminSessionEntity>, sqlx::Error> {
        let session = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            SELECT id, admin_id, access_jti_hash, refresh_jti_hash, expires_at, revoked_at, created_at
            FROM admin_sessions
            WHERE refresh_jti_hash = $1
              AND revoked_at IS NULL
              AND expires_at > NOW()
            "#,
        )
        .bind(refresh_jti_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Rotates a session: revokes the old row and inserts a replacement
    /// carrying the new token pair, atomically.
    pub async fn rotate(
        &self,
        old_session_id: Uuid,
        admin_id: Uuid,
        access_jti_hash: &str,
        refresh_jti_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<AdminSessionEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE admin_sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
            .bind(old_session_id)
            .execute(&mut *tx)
            .await?;

        let session = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            INSERT INTO admin_sessions (admin_id, access_jti_hash, refresh_jti_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, admin_id, access_jti_hash, refresh_jti_hash, expires_at, revoked_at, created_at
            "#,
        )
        .bind(admin_id)
        .bind(access_jti_hash)
        .bind(refresh_jti_hash)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(session)
    }

    /// Revokes the session holding the given refresh JTI hash. Returns
    /// false when no live session matched.
    pub async fn revoke_by_refresh_jti(&self, refresh_jti_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE admin_sessions
            SET revoked_at = NOW()
            WHERE refresh_jti_hash = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(refresh_jti_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes sessions past their expiry. Revoked rows are kept until
    /// they expire so audit trails stay intact.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

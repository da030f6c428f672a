//! Admin account repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminEntity;
use crate::metrics::QueryTimer;

/// Repository for admin account database operations.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Creates a new AdminRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_email");
        let result = sqlx::query_as::<_, AdminEntity>(
            r#"
            SELECT * FROM admins WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an admin by UUID.
    pub async fn find_by_id(&self, admin_id: Uuid) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_id");
        let result = sqlx::query_as::<_, AdminEntity>(
            r#"
            SELECT * FROM admins WHERE id = $1
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an admin's last login timestamp.
    pub async fn update_last_login(
        &self,
        admin_id: Uuid,
        last_login_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_admin_last_login");
        let result = sqlx::query(
            r#"
            UPDATE admins SET last_login_at = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(admin_id)
        .bind(last_login_at)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ())
    }
}

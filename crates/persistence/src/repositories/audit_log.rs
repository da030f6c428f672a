//! Admin audit log repository.
//!
//! The audit table doubles as the error sink and health-check journal.
//! Callers that must not fail on logging problems use `create_detached`.

use sqlx::PgPool;

use domain::models::audit_log::CreateAuditLogInput;

use crate::entities::audit_log::AuditLogEntity;

#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends an audit row.
    pub async fn create(&self, input: &CreateAuditLogInput) -> Result<AuditLogEntity, sqlx::Error> {
        let log = sqlx::query_as::<_, AuditLogEntity>(
            r#"
            INSERT INTO admin_audit_logs (admin_id, action, table_name, record_id, new_data)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, admin_id, action, table_name, record_id, new_data, created_at
            "#,
        )
        .bind(input.admin_id)
        .bind(&input.action)
        .bind(input.table_name.as_deref())
        .bind(input.record_id)
        .bind(input.new_data.as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    /// Appends an audit row without blocking the caller.
    ///
    /// Uses tokio::spawn so journaling failures never affect the request.
    pub fn create_detached(&self, input: CreateAuditLogInput) {
        let repo = self.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.create(&input).await {
                tracing::warn!("Failed to append audit log entry: {}", e);
            }
        });
    }

    /// Lists audit rows newest first, optionally filtered by action
    /// and/or table name, capped at `limit` rows.
    pub async fn list(
        &self,
        action: Option<&str>,
        table_name: Option<&str>,
        limit: i64,
    ) -> Result<Vec<AuditLogEntity>, sqlx::Error> {
        let logs = sqlx::query_as::<_, AuditLogEntity>(
            r#"
            SELECT id, admin_id, action, table_name, record_id, new_data, created_at
            FROM admin_audit_logs
            WHERE ($1::text IS NULL OR action = $1)
              AND ($2::text IS NULL OR table_name = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(action)
        .bind(table_name)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}

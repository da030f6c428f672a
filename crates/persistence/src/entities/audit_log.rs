//! Audit log entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::audit_log::AuditLog;

/// Database row mapping for the admin_audit_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntity {
    pub id: Uuid,
    pub admin_id: Option<Uuid>,
    pub action: String,
    pub table_name: Option<String>,
    pub record_id: Option<Uuid>,
    pub new_data: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogEntity> for AuditLog {
    fn from(entity: AuditLogEntity) -> Self {
        Self {
            id: entity.id,
            admin_id: entity.admin_id,
            action: entity.action,
            table_name: entity.table_name,
            record_id: entity.record_id,
            new_data: entity.new_data,
            created_at: entity.created_at,
        }
    }
}

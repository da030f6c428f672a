//! Audit log domain models.
//!
//! The audit table doubles as the error sink and the health-check
//! journal; rows are written best-effort and never block the request
//! that produced them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

/// Well-known audit actions.
pub mod actions {
    pub const ERROR: &str = "error";
    pub const HEALTH_CHECK: &str = "health_check";
}

/// A stored audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditLog {
    pub id: Uuid,
    pub admin_id: Option<Uuid>,
    pub action: String,
    pub table_name: Option<String>,
    pub record_id: Option<Uuid>,
    pub new_data: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting an audit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAuditLogInput {
    pub admin_id: Option<Uuid>,
    pub action: String,
    pub table_name: Option<String>,
    pub record_id: Option<Uuid>,
    pub new_data: Option<JsonValue>,
}

impl CreateAuditLogInput {
    pub fn new(action: &str) -> Self {
        Self {
            admin_id: None,
            action: action.to_string(),
            table_name: None,
            record_id: None,
            new_data: None,
        }
    }

    pub fn with_admin(mut self, admin_id: Uuid) -> Self {
        self.admin_id = Some(admin_id);
        self
    }

    pub fn with_table(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    pub fn with_record(mut self, record_id: Uuid) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_data(mut self, new_data: JsonValue) -> Self {
        self.new_data = Some(new_data);
        self
    }

    /// Entry recording an application error.
    pub fn error(error_type: &str, message: &str, metadata: Option<JsonValue>) -> Self {
        Self::new(actions::ERROR).with_table("errors").with_data(json!({
            "type": error_type,
            "message": message,
            "metadata": metadata,
        }))
    }

    /// Entry recording a database health probe.
    pub fn health_check(healthy: bool, latency_ms: f64, error: Option<&str>) -> Self {
        Self::new(actions::HEALTH_CHECK).with_data(json!({
            "status": if healthy { "healthy" } else { "error" },
            "latency": latency_ms,
            "error": error,
        }))
    }
}

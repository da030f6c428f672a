//! Admin entity (database row mapping).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::admin::{Admin, AdminPermissions, AdminRole};

/// Database row mapping for the admins table.
///
/// Keeps the password hash; it never crosses into the domain model.
#[derive(Debug, Clone, FromRow)]
pub struct AdminEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub permissions: JsonValue,
    pub email_confirmed: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminEntity> for Admin {
    fn from(entity: AdminEntity) -> Self {
        let permissions: AdminPermissions =
            serde_json::from_value(entity.permissions.clone()).unwrap_or_default();
        Self {
            id: entity.id,
            email: entity.email,
            role: entity.role.parse().unwrap_or(AdminRole::Admin),
            permissions,
            email_confirmed: entity.email_confirmed,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_entity(role: &str, permissions: JsonValue) -> AdminEntity {
        AdminEntity {
            id: Uuid::new_v4(),
            email: "admin@zhp.pl".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: role.to_string(),
            permissions,
            email_confirmed: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn parses_role_and_permissions() {
        let entity = sample_entity(
            "super_admin",
            json!({"can_manage_users": true, "can_manage_camps": true}),
        );
        let admin: Admin = entity.into();
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert!(admin.permissions.can_manage_users);
        assert!(!admin.permissions.can_manage_admins);
    }

    #[test]
    fn malformed_permissions_fall_back_to_denied() {
        let entity = sample_entity("admin", json!("not-an-object"));
        let admin: Admin = entity.into();
        assert_eq!(admin.permissions, AdminPermissions::default());
    }
}

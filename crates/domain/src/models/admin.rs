//! Admin account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Role of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(AdminRole::Admin),
            "super_admin" => Ok(AdminRole::SuperAdmin),
            _ => Err(format!("Unknown admin role: {}", s)),
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Admin => write!(f, "admin"),
            AdminRole::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

/// A single grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ManageCamps,
    ManageRegistrations,
    ManageAdmins,
}

/// Permission flags stored per admin. Missing flags read as denied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminPermissions {
    #[serde(default)]
    pub can_manage_users: bool,
    #[serde(default)]
    pub can_manage_camps: bool,
    #[serde(default)]
    pub can_manage_registrations: bool,
    #[serde(default)]
    pub can_manage_admins: bool,
}

impl AdminPermissions {
    /// Every flag granted, as held by super admins.
    pub fn all() -> Self {
        Self {
            can_manage_users: true,
            can_manage_camps: true,
            can_manage_registrations: true,
            can_manage_admins: true,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ManageUsers => self.can_manage_users,
            Permission::ManageCamps => self.can_manage_camps,
            Permission::ManageRegistrations => self.can_manage_registrations,
            Permission::ManageAdmins => self.can_manage_admins,
        }
    }
}

/// An admin account, without its credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub permissions: AdminPermissions,
    pub email_confirmed: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Permissions after applying the role override. Super admins hold
    /// every flag regardless of what is stored.
    pub fn effective_permissions(&self) -> AdminPermissions {
        match self.role {
            AdminRole::SuperAdmin => AdminPermissions::all(),
            AdminRole::Admin => self.permissions,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.effective_permissions().allows(permission)
    }
}

/// Login form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    #[validate(email(message = "Wprowadź poprawny adres email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Hasło musi mieć minimum 6 znaków"))]
    pub password: String,
}

/// Profile returned to the logged-in admin, with effective permissions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub permissions: AdminPermissions,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        let permissions = admin.effective_permissions();
        Self {
            id: admin.id,
            email: admin.email,
            role: admin.role,
            permissions,
            last_login_at: admin.last_login_at,
        }
    }
}

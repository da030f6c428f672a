//! First-admin bootstrap.
//!
//! A fresh deployment has no admin account, so nobody can reach the panel.
//! When the bootstrap credentials are configured, startup creates one
//! super-admin; the step is idempotent and skipped once any super admin
//! exists.

use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AdminBootstrapConfig;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Creates the configured super-admin account unless one already exists.
///
/// Called after migrations on startup.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<(), BootstrapError> {
    let Some(email) = bootstrap_email(config) else {
        return Ok(());
    };

    if super_admin_exists(pool, &email).await? {
        info!("Admin account already exists - skipping bootstrap");
        return Ok(());
    }

    let password_hash = hash_password(&config.bootstrap_password)?;
    let admin_id = insert_super_admin(pool, &email, &password_hash).await?;

    info!(
        email = %email,
        admin_id = %admin_id,
        "Bootstrap admin account created successfully"
    );
    warn!(
        "SECURITY: Remove CAMP__ADMIN__BOOTSTRAP_EMAIL and CAMP__ADMIN__BOOTSTRAP_PASSWORD \
         from configuration after initial setup."
    );

    Ok(())
}

/// Returns the normalized bootstrap email, or None when bootstrap should be
/// skipped. An email without a password is reported, since it usually means
/// a half-finished deployment config.
fn bootstrap_email(config: &AdminBootstrapConfig) -> Option<String> {
    if config.bootstrap_email.is_empty() {
        return None;
    }
    if config.bootstrap_password.is_empty() {
        warn!(
            "CAMP__ADMIN__BOOTSTRAP_EMAIL is set but CAMP__ADMIN__BOOTSTRAP_PASSWORD is empty - skipping bootstrap"
        );
        return None;
    }

    Some(config.bootstrap_email.trim().to_lowercase())
}

/// True when the bootstrap email is taken or any super admin exists.
async fn super_admin_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1)
            OR EXISTS(SELECT 1 FROM admins WHERE role = 'super_admin')
        "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await
}

async fn insert_super_admin(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO admins (email, password_hash, role, permissions, email_confirmed)
        VALUES ($1, $2, 'super_admin', '{}'::jsonb, true)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

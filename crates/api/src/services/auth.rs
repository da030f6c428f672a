//! Authentication service for admin login, token refresh and logout.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use domain::models::admin::Admin;
use persistence::repositories::{AdminRepository, AdminSessionRepository};
use shared::crypto::sha256_hex;
use shared::jwt::{extract_admin_id, JwtError, JwtKeys};
use shared::password::{verify_password, PasswordError};

use crate::error::ApiError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // One message for both unknown email and wrong password, so the
            // response never reveals which part failed.
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Nieprawidłowy email lub hasło".into())
            }
            AuthError::EmailNotConfirmed => {
                ApiError::Unauthorized("Email nie został potwierdzony".into())
            }
            AuthError::InvalidRefreshToken | AuthError::SessionNotFound => {
                ApiError::Unauthorized("Sesja wygasła. Zaloguj się ponownie.".into())
            }
            AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
            AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
            AuthError::DatabaseError(e) => ApiError::from(e),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub admin: Admin,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Freshly generated token pair with the jtis needed for session storage.
#[derive(Debug, Clone)]
struct TokenPair {
    access_token: String,
    access_token_jti: String,
    refresh_token: String,
    refresh_token_jti: String,
}

/// Authentication service.
pub struct AuthService {
    pool: PgPool,
    jwt: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtKeys>) -> Self {
        Self { pool, jwt }
    }

    /// Login with email and password.
    ///
    /// Order matters: the password is verified before the confirmation flag
    /// is checked, so an unconfirmed account still answers wrong-password
    /// attempts with the generic credentials message.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let email = normalize_email(email);
        let password = password.trim();

        let admins = AdminRepository::new(self.pool.clone());
        let entity = admins
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = verify_password(password, &entity.password_hash)?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        if !entity.email_confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        let now = Utc::now();
        admins.update_last_login(entity.id, now).await?;

        let tokens = self.generate_tokens(entity.id)?;

        let sessions = AdminSessionRepository::new(self.pool.clone());
        sessions
            .create(
                entity.id,
                &sha256_hex(&tokens.access_token_jti),
                &sha256_hex(&tokens.refresh_token_jti),
                now + Duration::seconds(self.jwt.refresh_token_expiry_secs),
            )
            .await?;

        let mut admin: Admin = entity.into();
        admin.last_login_at = Some(now);

        tracing::info!(admin_id = %admin.id, "Admin logged in");

        Ok(LoginResult {
            admin,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: self.jwt.access_token_expiry_secs,
        })
    }

    /// Refresh the token pair using a valid refresh token.
    ///
    /// Implements rotation: the old session row is revoked and a new one is
    /// inserted in a single transaction, so the presented refresh token can
    /// never be replayed.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AuthError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|e| match e {
                JwtError::Expired | JwtError::Invalid | JwtError::Decoding(_) => {
                    AuthError::InvalidRefreshToken
                }
                _ => AuthError::TokenError(e),
            })?;

        let admin_id = extract_admin_id(&claims).map_err(|_| AuthError::InvalidRefreshToken)?;

        let sessions = AdminSessionRepository::new(self.pool.clone());
        let session = sessions
            .find_active_by_refresh_jti(&sha256_hex(&claims.jti))
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.admin_id != admin_id {
            tracing::warn!(
                session_admin = %session.admin_id,
                token_admin = %admin_id,
                "Refresh token does not match its session"
            );
            return Err(AuthError::SessionNotFound);
        }

        let tokens = self.generate_tokens(admin_id)?;
        let expires_at = Utc::now() + Duration::seconds(self.jwt.refresh_token_expiry_secs);

        sessions
            .rotate(
                session.id,
                admin_id,
                &sha256_hex(&tokens.access_token_jti),
                &sha256_hex(&tokens.refresh_token_jti),
                expires_at,
            )
            .await?;

        Ok(RefreshResult {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: self.jwt.access_token_expiry_secs,
        })
    }

    /// Logout by revoking the session associated with the refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|e| match e {
                JwtError::Expired | JwtError::Invalid | JwtError::Decoding(_) => {
                    AuthError::InvalidRefreshToken
                }
                _ => AuthError::TokenError(e),
            })?;

        let sessions = AdminSessionRepository::new(self.pool.clone());
        let revoked = sessions
            .revoke_by_refresh_jti(&sha256_hex(&claims.jti))
            .await?;

        if !revoked {
            tracing::debug!("Session not found during logout, may already be revoked");
        }

        Ok(())
    }

    /// Generate an access and refresh token pair for an admin.
    fn generate_tokens(&self, admin_id: Uuid) -> Result<TokenPair, AuthError> {
        let (access_token, access_token_jti) = self.jwt.generate_access_token(admin_id)?;
        let (refresh_token, refresh_token_jti) = self.jwt.generate_refresh_token(admin_id)?;

        Ok(TokenPair {
            access_token,
            access_token_jti,
            refresh_token,
            refresh_token_jti,
        })
    }
}

/// Normalizes a login email the way the registration side stores it.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

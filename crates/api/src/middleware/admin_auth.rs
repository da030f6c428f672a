//! Admin authentication middleware.
//!
//! Guards the admin route group: validates the Bearer access token, checks
//! that the session it belongs to is still live, loads the admin account and
//! injects an [`AdminAuth`] value into request extensions.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use domain::models::admin::{Admin, AdminPermissions, AdminRole};
use persistence::repositories::{AdminRepository, AdminSessionRepository};
use shared::crypto::sha256_hex;
use shared::jwt::extract_admin_id;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated admin context available to handlers behind [`require_admin`].
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub admin_id: Uuid,
    pub email: String,
    pub role: AdminRole,
    /// Permissions after the role override is applied.
    pub permissions: AdminPermissions,
}

impl AdminAuth {
    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            admin_id: admin.id,
            email: admin.email.clone(),
            role: admin.role,
            permissions: admin.effective_permissions(),
        }
    }
}

/// Extracts the Bearer token from the Authorization header.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Middleware that requires a logged-in admin.
///
/// The token alone is not enough: its session row has to be live (not
/// revoked, not expired), so logout and refresh rotation take effect
/// immediately. A valid token whose admin account no longer exists is
/// rejected with 403.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req)
        .ok_or_else(|| ApiError::Unauthorized("Brak tokenu uwierzytelniającego".into()))?;

    let claims = state.jwt.validate_access_token(token).map_err(|e| {
        tracing::debug!("Access token rejected: {}", e);
        ApiError::Unauthorized("Nieprawidłowy lub wygasły token".into())
    })?;

    let admin_id = extract_admin_id(&claims)
        .map_err(|_| ApiError::Unauthorized("Nieprawidłowy lub wygasły token".into()))?;

    let sessions = AdminSessionRepository::new(state.pool.clone());
    let session = sessions
        .find_active_by_access_jti(&sha256_hex(&claims.jti))
        .await?
        .ok_or_else(|| {
            ApiError::Unauthorized("Sesja wygasła. Zaloguj się ponownie.".into())
        })?;

    if session.admin_id != admin_id {
        tracing::warn!(
            session_admin = %session.admin_id,
            token_admin = %admin_id,
            "Session row does not match token subject"
        );
        return Err(ApiError::Unauthorized("Nieprawidłowy lub wygasły token".into()));
    }

    let admins = AdminRepository::new(state.pool.clone());
    let admin: Admin = admins
        .find_by_id(admin_id)
        .await?
        .map(Into::into)
        .ok_or_else(|| ApiError::Forbidden("Konto administratora nie istnieje".into()))?;

    req.extensions_mut().insert(AdminAuth::from_admin(&admin));
    Ok(next.run(req).await)
}

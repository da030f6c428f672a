//! Authentication endpoint handlers.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use domain::models::admin::{Admin, AdminProfile, LoginRequest};
use persistence::repositories::AdminRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AdminAuth;
use crate::services::AuthService;

/// Token pair issued to a logged-in admin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Login response: admin profile plus a fresh token pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LoginResponse {
    pub admin: AdminProfile,
    pub tokens: TokenResponse,
}

/// Body carrying a refresh token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Login with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let auth = AuthService::new(state.pool.clone(), state.jwt.clone());
    let result = auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        admin: AdminProfile::from(result.admin),
        tokens: TokenResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_in: result.expires_in,
        },
    }))
}

/// Exchange a refresh token for a new token pair.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let auth = AuthService::new(state.pool.clone(), state.jwt.clone());
    let result = auth.refresh(&request.refresh_token).await?;

    Ok(Json(TokenResponse {
        access_token: result.access_token,
        refresh_token: result.refresh_token,
        expires_in: result.expires_in,
    }))
}

/// Revoke the session behind a refresh token.
///
/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let auth = AuthService::new(state.pool.clone(), state.jwt.clone());
    auth.logout(&request.refresh_token).await?;

    Ok(Json(MessageResponse {
        message: "Wylogowano pomyślnie".to_string(),
    }))
}

/// Profile of the logged-in admin, with effective permissions.
///
/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
) -> Result<Json<AdminProfile>, ApiError> {
    let admins = AdminRepository::new(state.pool.clone());
    let entity = admins.find_by_id(auth.admin_id).await?.ok_or_else(|| {
        warn!(admin_id = %auth.admin_id, "Admin row vanished for live session");
        ApiError::Forbidden("Konto administratora nie istnieje".to_string())
    })?;

    Ok(Json(AdminProfile::from(Admin::from(entity))))
}

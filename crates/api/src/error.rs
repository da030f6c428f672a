//! API error type and its HTTP mapping.
//!
//! Handlers return [`ApiError`]; the `IntoResponse` impl turns it into a
//! JSON body carrying a machine-readable code and a Polish user message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<Vec<ValidationDetail>>,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Validation error with a single message and no per-field details.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Validation { .. } => "validation_error",
            ApiError::Internal(_) => "internal_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Internal details stay in the logs; the client sees a generic message.
        let (message, details) = match self {
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Wystąpił nieoczekiwany błąd serwera".to_string(), None)
            }
            ApiError::Validation { message, details } => (message, details),
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::ServiceUnavailable(msg) => (msg, None),
        };

        let body = ErrorBody {
            error: code.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a named database constraint to the Polish message shown to the user.
///
/// The registration table carries named CHECK and UNIQUE constraints so a
/// violation can be reported precisely instead of as a generic 500.
fn constraint_error(constraint: &str) -> Option<ApiError> {
    match constraint {
        "registrations_camp_id_pesel_key" => Some(ApiError::Conflict(
            "Już istnieje zgłoszenie dla tego uczestnika na ten obóz".into(),
        )),
        "registrations_pesel_check" => {
            Some(ApiError::validation("Nieprawidłowy format numeru PESEL"))
        }
        "registrations_email_check" => {
            Some(ApiError::validation("Nieprawidłowy format adresu email"))
        }
        "registrations_phone_check" => {
            Some(ApiError::validation("Nieprawidłowy format numeru telefonu"))
        }
        "registrations_postal_code_check" => {
            Some(ApiError::validation("Nieprawidłowy format kodu pocztowego"))
        }
        _ => None,
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Nie znaleziono zasobu".into()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ApiError::ServiceUnavailable(
                    "Problem z połączeniem z bazą danych. Spróbuj ponownie za chwilę.".into(),
                )
            }
            sqlx::Error::Database(db_err) => {
                if let Some(mapped) = db_err.constraint().and_then(constraint_error) {
                    return mapped;
                }
                match db_err.code().as_deref() {
                    Some("23505") => ApiError::Conflict("Zasób już istnieje".into()),
                    Some("23503") => ApiError::NotFound("Powiązany zasób nie istnieje".into()),
                    _ => ApiError::Internal(format!("Database error: {}", db_err)),
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for e in field_errors {
                details.push(ValidationDetail {
                    field: field.to_string(),
                    message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                });
            }
        }

        // A lone error speaks for itself; several get a generic envelope and
        // the client renders the per-field details.
        let message = if details.len() == 1 {
            details[0].message.clone()
        } else {
            "Nieprawidłowe dane formularza".to_string()
        };

        ApiError::Validation {
            message,
            details: Some(details),
        }
    }
}

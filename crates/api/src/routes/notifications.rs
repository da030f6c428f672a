//! Notification endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::Notification;
use persistence::repositories::NotificationRepository;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub registration_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, message = "Podaj temat wiadomości"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Treść wiadomości nie może być pusta"))]
    pub content: String,

    pub registration_id: Option<Uuid>,
}

/// List notifications, newest first.
///
/// GET /api/v1/notifications?unread_only=&registration_id=
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let repository = NotificationRepository::new(state.pool.clone());
    let notifications: Vec<Notification> = repository
        .list(query.unread_only, query.registration_id)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect();

    Ok(Json(notifications))
}

/// Create a custom notification, optionally tied to a registration.
///
/// POST /api/v1/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = NotificationRepository::new(state.pool.clone());
    let notification = Notification::from(
        repository
            .create_custom(&request.subject, &request.content, request.registration_id)
            .await?,
    );

    info!(notification_id = %notification.id, "Notification created");
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Mark a notification as read.
///
/// POST /api/v1/notifications/{id}/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, ApiError> {
    let repository = NotificationRepository::new(state.pool.clone());
    let notification = repository
        .mark_read(id)
        .await?
        .map(Notification::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono powiadomienia".to_string()))?;

    Ok(Json(notification))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults_unread_only_to_false() {
        let query: NotificationListQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.unread_only);
        assert!(query.registration_id.is_none());
    }

    #[test]
    fn create_request_rejects_empty_fields() {
        let request = CreateNotificationRequest {
            subject: String::new(),
            content: String::new(),
            registration_id: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(
            fields["subject"][0].message.clone().unwrap(),
            "Podaj temat wiadomości"
        );
        assert_eq!(
            fields["content"][0].message.clone().unwrap(),
            "Treść wiadomości nie może być pusta"
        );
    }
}

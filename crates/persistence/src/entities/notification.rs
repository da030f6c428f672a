//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::notification::{Notification, NotificationType};

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub registration_id: Option<Uuid>,
    #[sqlx(rename = "type")]
    pub notification_type: String,
    pub subject: String,
    pub content: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            registration_id: entity.registration_id,
            // The column carries a CHECK constraint; custom is the
            // catch-all kind.
            notification_type: entity
                .notification_type
                .parse()
                .unwrap_or(NotificationType::Custom),
            subject: entity.subject,
            content: entity.content,
            is_read: entity.is_read,
            read_at: entity.read_at,
            created_at: entity.created_at,
        }
    }
}

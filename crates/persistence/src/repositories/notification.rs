//! Notification repository.
//!
//! Writing a row is what "sending" means here; there is no mail
//! transport and `created_at` doubles as the sent timestamp.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::notification::{ActivityNotice, ParticipantMessage};

use crate::entities::notification::NotificationEntity;
use crate::metrics::QueryTimer;

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists an admin feed entry. Feed entries are `type=custom`
    /// rows with no registration link.
    pub async fn record_activity(
        &self,
        notice: &ActivityNotice,
    ) -> Result<NotificationEntity, sqlx::Error> {
        self.insert("custom", &notice.title, &notice.message, None)
            .await
    }

    /// Persists a message addressed to a participant, tied to their
    /// registration.
    pub async fn record_message(
        &self,
        registration_id: Uuid,
        message: &ParticipantMessage,
    ) -> Result<NotificationEntity, sqlx::Error> {
        self.insert(
            &message.notification_type.to_string(),
            &message.subject,
            &message.content,
            Some(registration_id),
        )
        .await
    }

    /// Persists a custom notification from the admin UI.
    pub async fn create_custom(
        &self,
        subject: &str,
        content: &str,
        registration_id: Option<Uuid>,
    ) -> Result<NotificationEntity, sqlx::Error> {
        self.insert("custom", subject, content, registration_id)
            .await
    }

    async fn insert(
        &self,
        notification_type: &str,
        subject: &str,
        content: &str,
        registration_id: Option<Uuid>,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("notification_insert");

        let notification = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (type, subject, content, registration_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, registration_id, type, subject, content, is_read, read_at, created_at
            "#,
        )
        .bind(notification_type)
        .bind(subject)
        .bind(content)
        .bind(registration_id)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(notification)
    }

    /// Lists notifications newest first, optionally narrowed to unread
    /// rows and/or a single registration.
    pub async fn list(
        &self,
        unread_only: bool,
        registration_id: Option<Uuid>,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("notification_list");

        let notifications = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, registration_id, type, subject, content, is_read, read_at, created_at
            FROM notifications
            WHERE ($1::uuid IS NULL OR registration_id = $1)
              AND (NOT $2 OR is_read = false)
            ORDER BY created_at DESC
            "#,
        )
        .bind(registration_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;

        timer.record();
        Ok(notifications)
    }

    /// Marks a single notification as read. Returns the updated row, or
    /// None when the id does not exist.
    pub async fn mark_read(&self, id: Uuid) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let notification = sqlx::query_as::<_, NotificationEntity>(
            r#"
            UPDATE notifications
            SET is_read = true, read_at = NOW()
            WHERE id = $1
            RETURNING id, registration_id, type, subject, content, is_read, read_at, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }
}

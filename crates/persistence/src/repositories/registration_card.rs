//! Registration card repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::registration_card::RegistrationCardEntity;
use crate::metrics::QueryTimer;

#[derive(Debug, Clone)]
pub struct RegistrationCardRepository {
    pool: PgPool,
}

impl RegistrationCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an uploaded card file for a registration.
    pub async fn create(
        &self,
        registration_id: Uuid,
        file_name: &str,
        file_path: &str,
        content_type: &str,
        size_bytes: i64,
        uploaded_by: Option<Uuid>,
    ) -> Result<RegistrationCardEntity, sqlx::Error> {
        let timer = QueryTimer::new("registration_card_create");

        let card = sqlx::query_as::<_, RegistrationCardEntity>(
            r#"
            INSERT INTO registration_cards
                (registration_id, file_name, file_path, content_type, size_bytes, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, registration_id, file_name, file_path, content_type, size_bytes,
                      uploaded_by, uploaded_at
            "#,
        )
        .bind(registration_id)
        .bind(file_name)
        .bind(file_path)
        .bind(content_type)
        .bind(size_bytes)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(card)
    }

    /// Returns the most recently uploaded card for a registration, if any.
    pub async fn find_latest_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<RegistrationCardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("registration_card_find_latest");

        let card = sqlx::query_as::<_, RegistrationCardEntity>(
            r#"
            SELECT id, registration_id, file_name, file_path, content_type, size_bytes,
                   uploaded_by, uploaded_at
            FROM registration_cards
            WHERE registration_id = $1
            ORDER BY uploaded_at DESC
            LIMIT 1
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await?;

        timer.record();
        Ok(card)
    }

    /// Lists every card uploaded for a registration, newest first.
    pub async fn list_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<RegistrationCardEntity>, sqlx::Error> {
        let cards = sqlx::query_as::<_, RegistrationCardEntity>(
            r#"
            SELECT id, registration_id, file_name, file_path, content_type, size_bytes,
                   uploaded_by, uploaded_at
            FROM registration_cards
            WHERE registration_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(registration_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Deletes a card row by id, returning the deleted row so the caller
    /// can remove the stored file as well.
    pub async fn delete(&self, id: Uuid) -> Result<Option<RegistrationCardEntity>, sqlx::Error> {
        let card = sqlx::query_as::<_, RegistrationCardEntity>(
            r#"
            DELETE FROM registration_cards
            WHERE id = $1
            RETURNING id, registration_id, file_name, file_path, content_type, size_bytes,
                      uploaded_by, uploaded_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }
}

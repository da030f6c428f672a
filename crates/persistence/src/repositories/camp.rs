//! Camp repository for database operations.

use domain::models::camp::{CampRequest, UpdateCampTypeDescriptionRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CampEntity, CampTypeDescriptionEntity};
use crate::metrics::QueryTimer;

/// Repository for camp-related database operations.
#[derive(Clone)]
pub struct CampRepository {
    pool: PgPool,
}

impl CampRepository {
    /// Creates a new CampRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all camps ordered by start date.
    pub async fn list(&self) -> Result<Vec<CampEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_camps");
        let result = sqlx::query_as::<_, CampEntity>(
            r#"
            SELECT * FROM camps
            ORDER BY start_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find camp by UUID.
    pub async fn find_by_id(&self, camp_id: Uuid) -> Result<Option<CampEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_camp_by_id");
        let result = sqlx::query_as::<_, CampEntity>(
            r#"
            SELECT * FROM camps WHERE id = $1
            "#,
        )
        .bind(camp_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new camp.
    pub async fn create(&self, input: &CampRequest) -> Result<CampEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_camp");
        let result = sqlx::query_as::<_, CampEntity>(
            r#"
            INSERT INTO camps (name, type, location, start_date, end_date, price, capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.camp_type.to_string())
        .bind(&input.location)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.price)
        .bind(input.capacity)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace a camp's fields. Returns `None` when the camp does not exist.
    pub async fn update(
        &self,
        camp_id: Uuid,
        input: &CampRequest,
    ) -> Result<Option<CampEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_camp");
        let result = sqlx::query_as::<_, CampEntity>(
            r#"
            UPDATE camps
            SET name = $2,
                type = $3,
                location = $4,
                start_date = $5,
                end_date = $6,
                price = $7,
                capacity = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(camp_id)
        .bind(&input.name)
        .bind(input.camp_type.to_string())
        .bind(&input.location)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.price)
        .bind(input.capacity)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a camp, returning the removed row.
    pub async fn delete(&self, camp_id: Uuid) -> Result<Option<CampEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_camp");
        let result = sqlx::query_as::<_, CampEntity>(
            r#"
            DELETE FROM camps WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(camp_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Descriptions of the camp kinds shown in the public offer section.
    pub async fn list_type_descriptions(
        &self,
    ) -> Result<Vec<CampTypeDescriptionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_camp_type_descriptions");
        let result = sqlx::query_as::<_, CampTypeDescriptionEntity>(
            r#"
            SELECT * FROM camp_type_descriptions
            ORDER BY type ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update the label and description for one camp kind.
    pub async fn update_type_description(
        &self,
        camp_type: &str,
        input: &UpdateCampTypeDescriptionRequest,
    ) -> Result<Option<CampTypeDescriptionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_camp_type_description");
        let result = sqlx::query_as::<_, CampTypeDescriptionEntity>(
            r#"
            UPDATE camp_type_descriptions
            SET label = $2,
                description = $3,
                updated_at = NOW()
            WHERE type = $1
            RETURNING *
            "#,
        )
        .bind(camp_type)
        .bind(&input.label)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

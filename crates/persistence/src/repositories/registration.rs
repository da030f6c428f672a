//! Registration repository for database operations.

use domain::models::registration::{CreateRegistrationRequest, UpdateRegistrationRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RegistrationEntity, RegistrationWithCampEntity};
use crate::metrics::QueryTimer;

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration from the public form. New rows always start
    /// pending with nothing paid.
    pub async fn create(
        &self,
        input: &CreateRegistrationRequest,
    ) -> Result<RegistrationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            INSERT INTO registrations (camp_id, first_name, last_name, pesel, birth_date,
                                       email, phone, address, city, postal_code,
                                       zhp_status, notes, registration_status, payment_status,
                                       paid_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending', 'pending', 0)
            RETURNING *
            "#,
        )
        .bind(input.camp_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.pesel)
        .bind(input.birth_date)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.postal_code)
        .bind(&input.zhp_status)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List registrations joined with their camp, newest first. The camp
    /// filter is optional.
    pub async fn list_with_camp(
        &self,
        camp_id: Option<Uuid>,
    ) -> Result<Vec<RegistrationWithCampEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_with_camp");
        let result = if let Some(camp_id) = camp_id {
            sqlx::query_as::<_, RegistrationWithCampEntity>(
                r#"
                SELECT r.*,
                       c.name AS camp_name,
                       c.start_date AS camp_start_date,
                       c.end_date AS camp_end_date,
                       c.price AS camp_price
                FROM registrations r
                JOIN camps c ON c.id = r.camp_id
                WHERE r.camp_id = $1
                ORDER BY r.created_at DESC
                "#,
            )
            .bind(camp_id)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, RegistrationWithCampEntity>(
                r#"
                SELECT r.*,
                       c.name AS camp_name,
                       c.start_date AS camp_start_date,
                       c.end_date AS camp_end_date,
                       c.price AS camp_price
                FROM registrations r
                JOIN camps c ON c.id = r.camp_id
                ORDER BY r.created_at DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Find registration by UUID.
    pub async fn find_by_id(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_id");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT * FROM registrations WHERE id = $1
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find registration by UUID together with its camp columns.
    pub async fn find_with_camp(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<RegistrationWithCampEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_with_camp");
        let result = sqlx::query_as::<_, RegistrationWithCampEntity>(
            r#"
            SELECT r.*,
                   c.name AS camp_name,
                   c.start_date AS camp_start_date,
                   c.end_date AS camp_end_date,
                   c.price AS camp_price
            FROM registrations r
            JOIN camps c ON c.id = r.camp_id
            WHERE r.id = $1
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace a registration from the admin edit form, stored statuses
    /// included.
    pub async fn update(
        &self,
        registration_id: Uuid,
        input: &UpdateRegistrationRequest,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE registrations
            SET camp_id = $2,
                first_name = $3,
                last_name = $4,
                pesel = $5,
                birth_date = $6,
                email = $7,
                phone = $8,
                address = $9,
                city = $10,
                postal_code = $11,
                zhp_status = $12,
                notes = $13,
                registration_status = $14,
                payment_status = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(registration_id)
        .bind(input.camp_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.pesel)
        .bind(input.birth_date)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.postal_code)
        .bind(&input.zhp_status)
        .bind(&input.notes)
        .bind(input.registration_status.to_string())
        .bind(input.payment_status.to_string())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a registration, returning the removed row.
    pub async fn delete(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            DELETE FROM registrations WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite the notes column. The caller composes the content; note
    /// entries are prepended newest-first.
    pub async fn set_notes(
        &self,
        registration_id: Uuid,
        notes: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_registration_notes");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE registrations
            SET notes = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(registration_id)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Cancel a registration and replace its notes with the exclusion
    /// record.
    pub async fn exclude(
        &self,
        registration_id: Uuid,
        notes: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("exclude_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE registrations
            SET registration_status = 'cancelled',
                notes = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(registration_id)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Add an incoming payment to the running total in a single
    /// statement, so concurrent payments cannot drop each other.
    pub async fn add_payment(
        &self,
        registration_id: Uuid,
        amount: f64,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("add_registration_payment");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE registrations
            SET paid_amount = paid_amount + $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(registration_id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counters for the statistics dashboard.
    pub async fn portal_stats(&self) -> Result<PortalStats, sqlx::Error> {
        let registration_stats: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE registration_status = 'pending') as pending,
                COUNT(*) FILTER (WHERE registration_status = 'confirmed') as confirmed
            FROM registrations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let camp_count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count FROM camps
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PortalStats {
            total_camps: camp_count.0,
            total_registrations: registration_stats.0,
            pending_registrations: registration_stats.1,
            confirmed_registrations: registration_stats.2,
        })
    }
}

/// Camp and registration counters shown on the statistics page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PortalStats {
    pub total_camps: i64,
    pub total_registrations: i64,
    pub pending_registrations: i64,
    pub confirmed_registrations: i64,
}

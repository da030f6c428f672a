//! Document template repository for database operations.

use domain::models::template::{CreateTemplateRequest, UpdateTemplateRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DocumentTemplateEntity;
use crate::metrics::QueryTimer;

/// Repository for document template database operations.
#[derive(Clone)]
pub struct DocumentTemplateRepository {
    pool: PgPool,
}

impl DocumentTemplateRepository {
    /// Creates a new DocumentTemplateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List templates, defaults first, then newest first. The type
    /// filter is optional.
    pub async fn list(
        &self,
        template_type: Option<&str>,
    ) -> Result<Vec<DocumentTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_templates");
        let result = sqlx::query_as::<_, DocumentTemplateEntity>(
            r#"
            SELECT * FROM document_templates
            WHERE ($1::text IS NULL OR type = $1)
            ORDER BY is_default DESC, created_at DESC
            "#,
        )
        .bind(template_type)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find template by UUID.
    pub async fn find_by_id(
        &self,
        template_id: Uuid,
    ) -> Result<Option<DocumentTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_template_by_id");
        let result = sqlx::query_as::<_, DocumentTemplateEntity>(
            r#"
            SELECT * FROM document_templates WHERE id = $1
            "#,
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a template. When it is marked default, the previous default
    /// of the same type is cleared in the same transaction.
    pub async fn create(
        &self,
        input: &CreateTemplateRequest,
    ) -> Result<DocumentTemplateEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        if input.is_default {
            sqlx::query(
                r#"
                UPDATE document_templates
                SET is_default = false, updated_at = NOW()
                WHERE type = $1 AND is_default = true
                "#,
            )
            .bind(input.template_type.to_string())
            .execute(&mut *tx)
            .await?;
        }

        let created = sqlx::query_as::<_, DocumentTemplateEntity>(
            r#"
            INSERT INTO document_templates (type, name, content, is_default)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.template_type.to_string())
        .bind(&input.name)
        .bind(&input.content)
        .bind(input.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Update a template's name, content and default flag. The type is
    /// fixed at creation; a default swap happens atomically with the
    /// update.
    pub async fn update(
        &self,
        template_id: Uuid,
        input: &UpdateTemplateRequest,
    ) -> Result<Option<DocumentTemplateEntity>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, DocumentTemplateEntity>(
            r#"
            SELECT * FROM document_templates WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(template_id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing = match existing {
            Some(existing) => existing,
            None => return Ok(None),
        };

        if input.is_default {
            sqlx::query(
                r#"
                UPDATE document_templates
                SET is_default = false, updated_at = NOW()
                WHERE type = $1 AND id <> $2 AND is_default = true
                "#,
            )
            .bind(&existing.template_type)
            .bind(template_id)
            .execute(&mut *tx)
            .await?;
        }

        let updated = sqlx::query_as::<_, DocumentTemplateEntity>(
            r#"
            UPDATE document_templates
            SET name = $2, content = $3, is_default = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(template_id)
        .bind(&input.name)
        .bind(&input.content)
        .bind(input.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete a template, returning the removed row.
    pub async fn delete(
        &self,
        template_id: Uuid,
    ) -> Result<Option<DocumentTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_template");
        let result = sqlx::query_as::<_, DocumentTemplateEntity>(
            r#"
            DELETE FROM document_templates WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

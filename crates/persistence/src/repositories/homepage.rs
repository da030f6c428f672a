//! Homepage section and image repositories.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::homepage::UpdateHomepageSectionRequest;

use crate::entities::homepage::{HomepageImageEntity, HomepageSectionEntity};
use crate::metrics::QueryTimer;

#[derive(Debug, Clone)]
pub struct HomepageRepository {
    pool: PgPool,
}

impl HomepageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists sections in display order. Hidden sections are filtered
    /// out unless `include_hidden` is set.
    pub async fn list_sections(
        &self,
        include_hidden: bool,
    ) -> Result<Vec<HomepageSectionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("homepage_list_sections");

        let sections = sqlx::query_as::<_, HomepageSectionEntity>(
            r#"
            SELECT id, type, title, subtitle, content, "order", is_visible, updated_at
            FROM homepage_sections
            WHERE $1 OR is_visible = true
            ORDER BY "order" ASC
            "#,
        )
        .bind(include_hidden)
        .fetch_all(&self.pool)
        .await?;

        timer.record();
        Ok(sections)
    }

    pub async fn find_section_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<HomepageSectionEntity>, sqlx::Error> {
        let section = sqlx::query_as::<_, HomepageSectionEntity>(
            r#"
            SELECT id, type, title, subtitle, content, "order", is_visible, updated_at
            FROM homepage_sections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(section)
    }

    /// Partial update of a section. COALESCE keeps any field the caller
    /// left unset, so a provided field cannot be cleared back to NULL.
    pub async fn update_section(
        &self,
        id: Uuid,
        update: &UpdateHomepageSectionRequest,
    ) -> Result<Option<HomepageSectionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("homepage_update_section");

        let section = sqlx::query_as::<_, HomepageSectionEntity>(
            r#"
            UPDATE homepage_sections
            SET title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                content = COALESCE($4, content),
                "order" = COALESCE($5, "order"),
                is_visible = COALESCE($6, is_visible),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, type, title, subtitle, content, "order", is_visible, updated_at
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.subtitle.as_deref())
        .bind(update.content.as_ref())
        .bind(update.order)
        .bind(update.is_visible)
        .fetch_optional(&self.pool)
        .await?;

        timer.record();
        Ok(section)
    }

    /// Attaches an uploaded image to a section. Display order defaults
    /// to 0.
    pub async fn create_image(
        &self,
        section_id: Uuid,
        file_path: &str,
        alt_text: Option<&str>,
    ) -> Result<HomepageImageEntity, sqlx::Error> {
        let timer = QueryTimer::new("homepage_create_image");

        let image = sqlx::query_as::<_, HomepageImageEntity>(
            r#"
            INSERT INTO homepage_images (section_id, file_path, alt_text)
            VALUES ($1, $2, $3)
            RETURNING id, section_id, file_path, alt_text, "order", created_at
            "#,
        )
        .bind(section_id)
        .bind(file_path)
        .bind(alt_text)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(image)
    }

    pub async fn find_image_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<HomepageImageEntity>, sqlx::Error> {
        let image = sqlx::query_as::<_, HomepageImageEntity>(
            r#"
            SELECT id, section_id, file_path, alt_text, "order", created_at
            FROM homepage_images
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    /// Lists a section's images in display order, ties broken by upload
    /// time.
    pub async fn list_images_for_section(
        &self,
        section_id: Uuid,
    ) -> Result<Vec<HomepageImageEntity>, sqlx::Error> {
        let images = sqlx::query_as::<_, HomepageImageEntity>(
            r#"
            SELECT id, section_id, file_path, alt_text, "order", created_at
            FROM homepage_images
            WHERE section_id = $1
            ORDER BY "order" ASC, created_at ASC
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Deletes an image row by id, returning the deleted row so the
    /// caller can remove the stored file as well.
    pub async fn delete_image(&self, id: Uuid) -> Result<Option<HomepageImageEntity>, sqlx::Error> {
        let image = sqlx::query_as::<_, HomepageImageEntity>(
            r#"
            DELETE FROM homepage_images
            WHERE id = $1
            RETURNING id, section_id, file_path, alt_text, "order", created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }
}

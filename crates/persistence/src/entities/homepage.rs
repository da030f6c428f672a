//! Homepage section and image entities (database row mappings).

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::homepage::{HomepageImage, HomepageSection, SectionType};

/// Database row mapping for the homepage_sections table.
#[derive(Debug, Clone, FromRow)]
pub struct HomepageSectionEntity {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub section_type: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: JsonValue,
    #[sqlx(rename = "order")]
    pub order: i32,
    pub is_visible: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<HomepageSectionEntity> for HomepageSection {
    fn from(entity: HomepageSectionEntity) -> Self {
        Self {
            id: entity.id,
            // The column carries a CHECK constraint; hero is the
            // landing block.
            section_type: entity.section_type.parse().unwrap_or(SectionType::Hero),
            title: entity.title,
            subtitle: entity.subtitle,
            content: entity.content,
            order: entity.order,
            is_visible: entity.is_visible,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the homepage_images table.
#[derive(Debug, Clone, FromRow)]
pub struct HomepageImageEntity {
    pub id: Uuid,
    pub section_id: Uuid,
    pub file_path: String,
    pub alt_text: Option<String>,
    #[sqlx(rename = "order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<HomepageImageEntity> for HomepageImage {
    fn from(entity: HomepageImageEntity) -> Self {
        Self {
            id: entity.id,
            section_id: entity.section_id,
            file_path: entity.file_path,
            alt_text: entity.alt_text,
            order: entity.order,
            created_at: entity.created_at,
        }
    }
}

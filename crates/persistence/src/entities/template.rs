//! Document template entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::template::{DocumentTemplate, TemplateType};

/// Database row mapping for the document_templates table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentTemplateEntity {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub template_type: String,
    pub name: String,
    pub content: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DocumentTemplateEntity> for DocumentTemplate {
    fn from(entity: DocumentTemplateEntity) -> Self {
        Self {
            id: entity.id,
            template_type: entity
                .template_type
                .parse()
                .unwrap_or(TemplateType::PaymentReminder),
            name: entity.name,
            content: entity.content,
            is_default: entity.is_default,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

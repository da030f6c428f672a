//! Registration card entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::registration::RegistrationCard;

/// Database row mapping for the registration_cards table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationCardEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Option<Uuid>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<RegistrationCardEntity> for RegistrationCard {
    fn from(entity: RegistrationCardEntity) -> Self {
        Self {
            id: entity.id,
            registration_id: entity.registration_id,
            file_name: entity.file_name,
            file_path: entity.file_path,
            content_type: entity.content_type,
            size_bytes: entity.size_bytes,
            uploaded_by: entity.uploaded_by,
            uploaded_at: entity.uploaded_at,
        }
    }
}

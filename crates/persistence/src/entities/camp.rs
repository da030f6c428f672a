//! Camp entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::camp::{Camp, CampType, CampTypeDescription};

/// Database row mapping for the camps table.
#[derive(Debug, Clone, FromRow)]
pub struct CampEntity {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub camp_type: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampEntity> for Camp {
    fn from(entity: CampEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            // The column carries a CHECK constraint; turnus is the
            // portal's default kind.
            camp_type: entity.camp_type.parse().unwrap_or(CampType::Turnus),
            location: entity.location,
            start_date: entity.start_date,
            end_date: entity.end_date,
            price: entity.price,
            capacity: entity.capacity,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the camp_type_descriptions table.
#[derive(Debug, Clone, FromRow)]
pub struct CampTypeDescriptionEntity {
    #[sqlx(rename = "type")]
    pub camp_type: String,
    pub label: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

impl From<CampTypeDescriptionEntity> for CampTypeDescription {
    fn from(entity: CampTypeDescriptionEntity) -> Self {
        Self {
            camp_type: entity.camp_type.parse().unwrap_or(CampType::Turnus),
            label: entity.label,
            description: entity.description,
            updated_at: entity.updated_at,
        }
    }
}

//! Camp domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_camp_date_order, validate_start_date_not_past};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Kind of stay offered by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampType {
    Hotelik,
    Zlot,
    Turnus,
}

impl CampType {
    /// All camp types, in the order they are presented on the portal.
    pub const ALL: [CampType; 3] = [CampType::Hotelik, CampType::Zlot, CampType::Turnus];
}

impl FromStr for CampType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hotelik" => Ok(CampType::Hotelik),
            "zlot" => Ok(CampType::Zlot),
            "turnus" => Ok(CampType::Turnus),
            _ => Err(format!("Unknown camp type: {}", s)),
        }
    }
}

impl std::fmt::Display for CampType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampType::Hotelik => write!(f, "hotelik"),
            CampType::Zlot => write!(f, "zlot"),
            CampType::Turnus => write!(f, "turnus"),
        }
    }
}

/// A camp open for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Camp {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub camp_type: CampType,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Camp {
    /// Human-readable date range, e.g. `01.07.2025 - 14.07.2025`.
    pub fn dates_display(&self) -> String {
        crate::formatting::format_date_range(self.start_date, self.end_date)
    }
}

/// Payload for creating or replacing a camp.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_camp_dates"))]
pub struct CampRequest {
    #[validate(length(min = 5, message = "Nazwa musi mieć minimum 5 znaków"))]
    pub name: String,

    #[serde(rename = "type")]
    pub camp_type: CampType,

    #[validate(length(min = 2, message = "Lokalizacja musi mieć minimum 2 znaki"))]
    pub location: String,

    #[validate(custom(function = "validate_start_date_not_past"))]
    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(range(min = 1.0, message = "Cena musi być większa od 0"))]
    pub price: f64,

    #[validate(range(min = 1, message = "Pojemność musi być większa od 0"))]
    pub capacity: i32,
}

fn validate_camp_dates(request: &CampRequest) -> Result<(), ValidationError> {
    validate_camp_date_order(request.start_date, request.end_date)
}

impl CampRequest {
    /// Validation for edits. A camp that already started may keep its
    /// original start date, so the start-in-future rule is dropped.
    pub fn validate_for_update(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        if let Some(ValidationErrorsKind::Field(field_errors)) =
            errors.errors_mut().get_mut("start_date")
        {
            field_errors.retain(|e| e.code != "start_date_past");
            if field_errors.is_empty() {
                errors.errors_mut().remove("start_date");
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Editable description of a camp type shown on the homepage offer section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CampTypeDescription {
    #[serde(rename = "type")]
    pub camp_type: CampType,
    pub label: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}

/// Payload for updating a camp type description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCampTypeDescriptionRequest {
    pub label: String,
    pub description: String,
}

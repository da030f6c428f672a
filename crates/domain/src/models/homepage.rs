//! Homepage content domain models.
//!
//! The public landing page is assembled from ordered sections; each
//! section may carry uploaded images.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of homepage section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Hero,
    Features,
    Stats,
    Camps,
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hero" => Ok(SectionType::Hero),
            "features" => Ok(SectionType::Features),
            "stats" => Ok(SectionType::Stats),
            "camps" => Ok(SectionType::Camps),
            _ => Err(format!("Unknown section type: {}", s)),
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Hero => write!(f, "hero"),
            SectionType::Features => write!(f, "features"),
            SectionType::Stats => write!(f, "stats"),
            SectionType::Camps => write!(f, "camps"),
        }
    }
}

/// A single block of the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HomepageSection {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: JsonValue,
    pub order: i32,
    pub is_visible: bool,
    pub updated_at: DateTime<Utc>,
}

/// An image uploaded for a section. `file_path` is relative to the
/// storage root; the public URL is derived by prefixing the uploads
/// mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HomepageImage {
    pub id: Uuid,
    pub section_id: Uuid,
    pub file_path: String,
    pub alt_text: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

/// Section together with its images, as the settings view consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomepageSectionWithImages {
    #[serde(flatten)]
    pub section: HomepageSection,
    pub homepage_images: Vec<HomepageImage>,
}

/// Partial update of a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateHomepageSectionRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<JsonValue>,
    pub order: Option<i32>,
    pub is_visible: Option<bool>,
}

impl UpdateHomepageSectionRequest {
    /// True when no field is set, in which case the update is a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.content.is_none()
            && self.order.is_none()
            && self.is_visible.is_none()
    }
}

//! Document template domain models.
//!
//! Templates hold letter bodies with `{{variable}}` placeholders. At
//! most one template per type is the default one; switching defaults
//! clears the previous holder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Purpose of a document template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    PaymentReminder,
    RegistrationCard,
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "payment_reminder" => Ok(TemplateType::PaymentReminder),
            "registration_card" => Ok(TemplateType::RegistrationCard),
            _ => Err(format!("Unknown template type: {}", s)),
        }
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateType::PaymentReminder => write!(f, "payment_reminder"),
            TemplateType::RegistrationCard => write!(f, "registration_card"),
        }
    }
}

/// A stored document template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocumentTemplate {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    pub name: String,
    pub content: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a template.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTemplateRequest {
    #[serde(rename = "type")]
    pub template_type: TemplateType,

    #[validate(length(min = 3, message = "Nazwa musi mieć minimum 3 znaki"))]
    pub name: String,

    #[validate(length(min = 10, message = "Treść musi mieć minimum 10 znaków"))]
    pub content: String,

    #[serde(default)]
    pub is_default: bool,
}

/// Payload for updating a template. The type is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 3, message = "Nazwa musi mieć minimum 3 znaki"))]
    pub name: String,

    #[validate(length(min = 10, message = "Treść musi mieć minimum 10 znaków"))]
    pub content: String,

    #[serde(default)]
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_type_round_trips() {
        assert_eq!(
            "payment_reminder".parse::<TemplateType>().unwrap(),
            TemplateType::PaymentReminder
        );
        assert_eq!(
            TemplateType::RegistrationCard.to_string(),
            "registration_card"
        );
        assert!("invoice".parse::<TemplateType>().is_err());
    }

    #[test]
    fn create_request_validates_lengths() {
        let request = CreateTemplateRequest {
            template_type: TemplateType::PaymentReminder,
            name: "Sz".to_string(),
            content: "krótko".to_string(),
            is_default: false,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(
            fields["name"][0].message.clone().unwrap(),
            "Nazwa musi mieć minimum 3 znaki"
        );
        assert_eq!(
            fields["content"][0].message.clone().unwrap(),
            "Treść musi mieć minimum 10 znaków"
        );
    }

    #[test]
    fn is_default_defaults_to_false_on_deserialize() {
        let request: CreateTemplateRequest = serde_json::from_str(
            r#"{"type":"payment_reminder","name":"Szablon","content":"Treść przypomnienia"}"#,
        )
        .unwrap();
        assert!(!request.is_default);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn template_serializes_type_under_type_key() {
        let template = DocumentTemplate {
            id: Uuid::nil(),
            template_type: TemplateType::PaymentReminder,
            name: "Przypomnienie standardowe".to_string(),
            content: "Prosimy o wpłatę {{amount}} PLN".to_string(),
            is_default: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["type"], "payment_reminder");
        assert_eq!(json["is_default"], true);
    }
}

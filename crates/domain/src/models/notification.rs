//! Notification domain models.
//!
//! Two flavours share one table: activity entries for the admin feed
//! (type `custom`, no registration) and messages addressed to a
//! participant (payment reminders, exclusion confirmations, custom
//! emails) that carry the registration id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::formatting::format_amount;

/// Category of a stored notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Registration,
    Payment,
    Reminder,
    Confirmation,
    Custom,
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "registration" => Ok(NotificationType::Registration),
            "payment" => Ok(NotificationType::Payment),
            "reminder" => Ok(NotificationType::Reminder),
            "confirmation" => Ok(NotificationType::Confirmation),
            "custom" => Ok(NotificationType::Custom),
            _ => Err(format!("Unknown notification type: {}", s)),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Registration => write!(f, "registration"),
            NotificationType::Payment => write!(f, "payment"),
            NotificationType::Reminder => write!(f, "reminder"),
            NotificationType::Confirmation => write!(f, "confirmation"),
            NotificationType::Custom => write!(f, "custom"),
        }
    }
}

/// Toast severity attached to admin feed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

/// A stored notification row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub id: Uuid,
    pub registration_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub subject: String,
    pub content: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    /// Doubles as the sent timestamp; rows are written when the message is
    /// "sent" (persisted).
    pub created_at: DateTime<Utc>,
}

/// An admin feed entry about something that just happened, together
/// with the toast severity the client should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ActivityNotice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl ActivityNotice {
    fn new(title: &str, message: String, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            message,
            severity,
        }
    }

    pub fn camp_created(name: &str) -> Self {
        Self::new(
            "Nowy obóz",
            format!("Utworzono nowy obóz: {}", name),
            Severity::Success,
        )
    }

    pub fn camp_updated(name: &str) -> Self {
        Self::new(
            "Aktualizacja obozu",
            format!("Zaktualizowano obóz: {}", name),
            Severity::Success,
        )
    }

    pub fn camp_deleted(name: &str) -> Self {
        Self::new(
            "Usunięcie obozu",
            format!("Usunięto obóz: {}", name),
            Severity::Warning,
        )
    }

    pub fn template_created(name: &str) -> Self {
        Self::new(
            "Nowy szablon",
            format!("Utworzono nowy szablon: {}", name),
            Severity::Success,
        )
    }

    pub fn template_updated(name: &str) -> Self {
        Self::new(
            "Aktualizacja szablonu",
            format!("Zaktualizowano szablon: {}", name),
            Severity::Success,
        )
    }

    pub fn template_deleted(name: &str) -> Self {
        Self::new(
            "Usunięcie szablonu",
            format!("Usunięto szablon: {}", name),
            Severity::Warning,
        )
    }

    pub fn registration_updated(participant_name: &str) -> Self {
        Self::new(
            "Aktualizacja zgłoszenia",
            format!("Zaktualizowano zgłoszenie: {}", participant_name),
            Severity::Success,
        )
    }

    pub fn registration_deleted(participant_name: &str) -> Self {
        Self::new(
            "Usunięcie zgłoszenia",
            format!("Usunięto zgłoszenie: {}", participant_name),
            Severity::Warning,
        )
    }

    pub fn card_uploaded() -> Self {
        Self::new(
            "Dodano kartę zgłoszeniową",
            "Karta zgłoszeniowa została pomyślnie dodana".to_string(),
            Severity::Success,
        )
    }

    pub fn card_deleted() -> Self {
        Self::new(
            "Usunięto kartę zgłoszeniową",
            "Karta zgłoszeniowa została pomyślnie usunięta".to_string(),
            Severity::Warning,
        )
    }

    pub fn note_added() -> Self {
        Self::new(
            "Dodano notatkę",
            "Notatka została dodana pomyślnie".to_string(),
            Severity::Success,
        )
    }

    pub fn reminder_sent(participant_name: &str) -> Self {
        Self::new(
            "Wysłano przypomnienie",
            format!("Wysłano przypomnienie o płatności do {}", participant_name),
            Severity::Success,
        )
    }

    pub fn message_sent() -> Self {
        Self::new(
            "Wysłano wiadomość",
            "Wiadomość została wysłana pomyślnie".to_string(),
            Severity::Success,
        )
    }

    pub fn participant_excluded() -> Self {
        Self::new(
            "Wykluczono uczestnika",
            "Uczestnik został wykluczony z obozu".to_string(),
            Severity::Warning,
        )
    }
}

/// Message content addressed to a participant, stored against their
/// registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantMessage {
    pub notification_type: NotificationType,
    pub subject: String,
    pub content: String,
}

impl ParticipantMessage {
    pub fn payment_reminder(camp_name: &str, price: f64) -> Self {
        Self {
            notification_type: NotificationType::Payment,
            subject: "Przypomnienie o płatności".to_string(),
            content: format!(
                "Przypominamy o konieczności dokonania płatności za obóz \"{}\". \
                 Prosimy o uregulowanie należności w wysokości {} PLN.",
                camp_name,
                format_amount(price)
            ),
        }
    }

    pub fn exclusion(reason: &str) -> Self {
        Self {
            notification_type: NotificationType::Confirmation,
            subject: "Wykluczenie z obozu".to_string(),
            content: format!("Twoje zgłoszenie zostało anulowane. Powód: {}", reason),
        }
    }

    pub fn custom(subject: &str, content: &str) -> Self {
        Self {
            notification_type: NotificationType::Custom,
            subject: subject.to_string(),
            content: content.to_string(),
        }
    }
}

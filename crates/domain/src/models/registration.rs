//! Registration domain models.
//!
//! A registration is a participant signed up for a single camp. The
//! stored payment status is edited by admins independently of the
//! running `paid_amount`; the payments view derives its own display
//! status from the amounts alone.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{
    validate_participant_age, validate_pesel, validate_phone, validate_postal_code,
};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::formatting::{format_amount, format_datetime};

/// Lifecycle status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    /// Polish label shown in admin listings.
    pub fn label_pl(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "Oczekujące",
            RegistrationStatus::Confirmed => "Potwierdzone",
            RegistrationStatus::Cancelled => "Anulowane",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            _ => Err(format!("Unknown registration status: {}", s)),
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Pending => write!(f, "pending"),
            RegistrationStatus::Confirmed => write!(f, "confirmed"),
            RegistrationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Stored payment status, edited by admins on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
    Refunded,
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "completed" => Ok(PaymentStatus::Completed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Partial => write!(f, "partial"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// A participant's registration for a camp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub camp_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub zhp_status: Option<String>,
    pub notes: Option<String>,
    pub registration_status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    pub paid_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Full participant name, `first last`.
    pub fn participant_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Camp columns joined onto a registration for listings, payments,
/// exports and document generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CampSummary {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
}

/// Registration together with the camp it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationWithCamp {
    #[serde(flatten)]
    pub registration: Registration,
    pub camp: CampSummary,
}

impl RegistrationWithCamp {
    /// Amount still owed for the camp. May be negative on overpayment.
    pub fn remaining_amount(&self) -> f64 {
        self.camp.price - self.registration.paid_amount
    }

    /// Display status derived from the amounts, as shown on the
    /// payments view. Independent of the stored [`PaymentStatus`].
    pub fn payment_display(&self) -> String {
        derived_payment_display(self.registration.paid_amount, self.camp.price)
    }
}

/// Derives the payments-view status from paid amount and camp price.
pub fn derived_payment_status(paid_amount: f64, price: f64) -> PaymentStatus {
    if paid_amount == 0.0 {
        PaymentStatus::Pending
    } else if paid_amount >= price {
        PaymentStatus::Completed
    } else {
        PaymentStatus::Partial
    }
}

/// Polish display text for the derived payment status.
pub fn derived_payment_display(paid_amount: f64, price: f64) -> String {
    match derived_payment_status(paid_amount, price) {
        PaymentStatus::Pending => "Oczekujące".to_string(),
        PaymentStatus::Completed => "Opłacone".to_string(),
        _ => format!(
            "Częściowo ({} / {} PLN)",
            format_amount(paid_amount),
            format_amount(price)
        ),
    }
}

/// A PDF registration card uploaded for a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationCard {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: Option<Uuid>,
    pub uploaded_at: DateTime<Utc>,
}

/// Prepends a timestamped note line to the existing notes.
///
/// Newest entries come first; the existing text (possibly empty) is
/// kept verbatim below the new line.
pub fn prepend_note(existing: Option<&str>, note: &str, at: DateTime<Utc>) -> String {
    format!("{}: {}\n{}", format_datetime(at), note, existing.unwrap_or(""))
}

/// Replacement notes content for an excluded participant.
pub fn exclusion_note(reason: &str) -> String {
    format!("Wykluczono: {}", reason)
}

/// Public registration form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateRegistrationRequest {
    pub camp_id: Uuid,

    #[validate(length(min = 2, message = "Imię musi mieć minimum 2 znaki"))]
    pub first_name: String,

    #[validate(length(min = 2, message = "Nazwisko musi mieć minimum 2 znaki"))]
    pub last_name: String,

    #[validate(custom(function = "validate_pesel"))]
    pub pesel: String,

    #[validate(custom(function = "validate_participant_age"))]
    pub birth_date: NaiveDate,

    #[validate(email(message = "Wprowadź poprawny adres email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 5, message = "Wprowadź pełny adres"))]
    pub address: String,

    #[validate(length(min = 2, message = "Wprowadź nazwę miasta"))]
    pub city: String,

    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: String,

    pub zhp_status: Option<String>,
    pub notes: Option<String>,
}

/// Admin edit payload. Carries the full record, including the stored
/// statuses; the participant age rule is not re-checked here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateRegistrationRequest {
    pub camp_id: Uuid,

    #[validate(length(min = 2, message = "Imię musi mieć minimum 2 znaki"))]
    pub first_name: String,

    #[validate(length(min = 2, message = "Nazwisko musi mieć minimum 2 znaki"))]
    pub last_name: String,

    #[validate(custom(function = "validate_pesel"))]
    pub pesel: String,

    pub birth_date: NaiveDate,

    #[validate(email(message = "Wprowadź poprawny adres email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 5, message = "Wprowadź pełny adres"))]
    pub address: String,

    #[validate(length(min = 2, message = "Wprowadź nazwę miasta"))]
    pub city: String,

    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: String,

    pub zhp_status: Option<String>,
    pub notes: Option<String>,
    pub registration_status: RegistrationStatus,
    pub payment_status: PaymentStatus,
}

/// Payload recording an incoming payment against a registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RecordPaymentRequest {
    #[validate(range(exclusive_min = 0.0, message = "Wprowadź poprawną kwotę"))]
    pub amount: f64,
}

/// Payload for adding a timestamped note.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AddNoteRequest {
    #[validate(length(min = 1, message = "Treść notatki nie może być pusta"))]
    pub note: String,
}

/// Payload for excluding a participant from a camp.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ExcludeRegistrationRequest {
    #[validate(length(min = 1, message = "Podaj powód wykluczenia"))]
    pub reason: String,
}

/// Payload for sending a custom email message to a participant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Podaj temat wiadomości"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Treść wiadomości nie może być pusta"))]
    pub content: String,
}

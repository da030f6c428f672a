//! Document generation from templates.
//!
//! Templates are plain text with `{{variable}}` placeholders. Every
//! known variable is replaced globally, one key at a time, in a fixed
//! order; placeholders without a matching variable stay in the output
//! untouched.

use chrono::NaiveDate;
use serde::Serialize;

use crate::formatting::{format_amount, format_date, format_date_range};
use crate::models::registration::{PaymentStatus, RegistrationStatus, RegistrationWithCamp};

/// Account number printed on payment documents when none is configured.
pub const DEFAULT_ACCOUNT_NUMBER: &str = "12 3456 7890 1234 5678 9012 3456";

/// Builds the variable set for a registration, in substitution order.
pub fn template_variables(
    row: &RegistrationWithCamp,
    account_number: &str,
    today: NaiveDate,
) -> Vec<(&'static str, String)> {
    let registration = &row.registration;
    let camp = &row.camp;

    vec![
        ("current_date", format_date(today)),
        ("camp_name", camp.name.clone()),
        (
            "camp_dates",
            format_date_range(camp.start_date, camp.end_date),
        ),
        ("participant_name", registration.participant_name()),
        ("amount", format_amount(camp.price)),
        ("due_date", format_date(camp.start_date)),
        ("account_number", account_number.to_string()),
        ("pesel", registration.pesel.clone()),
        ("birth_date", format_date(registration.birth_date)),
        ("email", registration.email.clone()),
        ("phone", registration.phone.clone()),
        (
            "address",
            format!(
                "{}, {} {}",
                registration.address, registration.postal_code, registration.city
            ),
        ),
        (
            "zhp_status",
            registration
                .zhp_status
                .clone()
                .unwrap_or_else(|| "Brak".to_string()),
        ),
        (
            "notes",
            registration.notes.clone().unwrap_or_default(),
        ),
    ]
}

/// Replaces every `{{key}}` occurrence for each variable in turn.
pub fn render_template(content: &str, variables: &[(&'static str, String)]) -> String {
    let mut rendered = content.to_string();
    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

/// Renders a template for a registration.
pub fn generate_document(
    template_content: &str,
    row: &RegistrationWithCamp,
    account_number: &str,
    today: NaiveDate,
) -> String {
    let variables = template_variables(row, account_number, today);
    render_template(template_content, &variables)
}

/// Registration card payload handed to the client for PDF rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationCardData {
    pub participant: CardParticipant,
    pub camp: CardCamp,
    pub status: CardStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParticipant {
    pub name: String,
    pub pesel: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zhp_status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCamp {
    pub name: String,
    pub dates: String,
    pub price: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStatus {
    pub registration: RegistrationStatus,
    pub payment: PaymentStatus,
}

/// Projects a registration into the card payload.
pub fn registration_card_data(row: &RegistrationWithCamp) -> RegistrationCardData {
    let registration = &row.registration;
    let camp = &row.camp;

    RegistrationCardData {
        participant: CardParticipant {
            name: registration.participant_name(),
            pesel: registration.pesel.clone(),
            birth_date: format_date(registration.birth_date),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            address: format!(
                "{}, {} {}",
                registration.address, registration.postal_code, registration.city
            ),
            zhp_status: registration
                .zhp_status
                .clone()
                .unwrap_or_else(|| "Brak".to_string()),
        },
        camp: CardCamp {
            name: camp.name.clone(),
            dates: format_date_range(camp.start_date, camp.end_date),
            price: format!("{} PLN", format_amount(camp.price)),
        },
        status: CardStatus {
            registration: registration.registration_status,
            payment: registration.payment_status,
        },
    }
}

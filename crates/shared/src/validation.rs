//! Form validation rules shared by the public registration form and the
//! admin camp forms.
//!
//! Messages are the Polish strings shown to end users; handlers surface them
//! verbatim in validation error details.

use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref PESEL_RE: Regex = Regex::new(r"^\d{11}$").unwrap();
    static ref POSTAL_CODE_RE: Regex = Regex::new(r"^\d{2}-\d{3}$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[\d\s-]{9,}$").unwrap();
}

/// Participant age bounds for the summer program, inclusive.
pub const MIN_PARTICIPANT_AGE: i32 = 7;
pub const MAX_PARTICIPANT_AGE: i32 = 21;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// PESEL: exactly 11 digits.
pub fn validate_pesel(pesel: &str) -> Result<(), ValidationError> {
    if PESEL_RE.is_match(pesel) {
        Ok(())
    } else {
        Err(error("pesel_format", "PESEL musi mieć 11 cyfr"))
    }
}

/// Polish postal code: `NN-NNN`.
pub fn validate_postal_code(postal_code: &str) -> Result<(), ValidationError> {
    if POSTAL_CODE_RE.is_match(postal_code) {
        Ok(())
    } else {
        Err(error(
            "postal_code_format",
            "Wprowadź poprawny kod pocztowy (XX-XXX)",
        ))
    }
}

/// Phone: optional leading `+`, then at least nine digits/spaces/dashes.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(error("phone_format", "Wprowadź poprawny numer telefonu"))
    }
}

/// Participant must be between 7 and 21 in the submission's calendar year.
///
/// The age is the plain year difference, matching how the registration form
/// always worked: someone born in December 2018 counts as 7 for the whole
/// of 2025.
pub fn validate_participant_age(birth_date: &NaiveDate) -> Result<(), ValidationError> {
    use chrono::Datelike;

    let age = Utc::now().date_naive().year() - birth_date.year();
    if (MIN_PARTICIPANT_AGE..=MAX_PARTICIPANT_AGE).contains(&age) {
        Ok(())
    } else {
        Err(error(
            "participant_age",
            "Uczestnik musi mieć między 7 a 21 lat",
        ))
    }
}

/// A camp may not start in the past.
pub fn validate_start_date_not_past(start_date: &NaiveDate) -> Result<(), ValidationError> {
    if *start_date >= Utc::now().date_naive() {
        Ok(())
    } else {
        Err(error(
            "start_date_past",
            "Data rozpoczęcia musi być w przyszłości",
        ))
    }
}

/// A camp must end on or after the day it starts.
pub fn validate_camp_date_order(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), ValidationError> {
    if end_date >= start_date {
        Ok(())
    } else {
        Err(error(
            "camp_dates_order",
            "Data zakończenia musi być późniejsza niż data rozpoczęcia",
        ))
    }
}

//! Domain services for the camp portal.
//!
//! Services contain pure business logic that operates on domain models.

pub mod documents;

pub use documents::{
    generate_document, registration_card_data, render_template, template_variables,
    RegistrationCardData, DEFAULT_ACCOUNT_NUMBER,
};

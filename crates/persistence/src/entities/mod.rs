//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin;
pub mod admin_session;
pub mod audit_log;
pub mod camp;
pub mod homepage;
pub mod notification;
pub mod registration;
pub mod registration_card;
pub mod template;

pub use admin::AdminEntity;
pub use admin_session::AdminSessionEntity;
pub use audit_log::AuditLogEntity;
pub use camp::{CampEntity, CampTypeDescriptionEntity};
pub use homepage::{HomepageImageEntity, HomepageSectionEntity};
pub use notification::NotificationEntity;
pub use registration::{RegistrationEntity, RegistrationWithCampEntity};
pub use registration_card::RegistrationCardEntity;
pub use template::DocumentTemplateEntity;

//! Repository implementations for database operations.

pub mod admin;
pub mod admin_session;
pub mod audit_log;
pub mod camp;
pub mod homepage;
pub mod notification;
pub mod registration;
pub mod registration_card;
pub mod template;

pub use admin::AdminRepository;
pub use admin_session::AdminSessionRepository;
pub use audit_log::AuditLogRepository;
pub use camp::CampRepository;
pub use homepage::HomepageRepository;
pub use notification::NotificationRepository;
pub use registration::{PortalStats, RegistrationRepository};
pub use registration_card::RegistrationCardRepository;
pub use template::DocumentTemplateRepository;

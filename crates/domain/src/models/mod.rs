//! Domain models for the camp portal.

pub mod admin;
pub mod audit_log;
pub mod camp;
pub mod homepage;
pub mod notification;
pub mod registration;
pub mod template;

pub use admin::{Admin, AdminPermissions, AdminRole};
pub use audit_log::AuditLog;
pub use camp::{Camp, CampType, CampTypeDescription};
pub use homepage::{HomepageImage, HomepageSection, SectionType};
pub use notification::{Notification, NotificationType};
pub use registration::{
    PaymentStatus, Registration, RegistrationCard, RegistrationStatus, RegistrationWithCamp,
};
pub use template::{DocumentTemplate, TemplateType};

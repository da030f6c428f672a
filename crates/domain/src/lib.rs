//! Domain models and services for the camp portal backend.
//!
//! This crate holds the business vocabulary of the portal: camps,
//! registrations, document templates, notifications, admins and the
//! homepage content blocks, together with pure services that operate
//! on them (document rendering, Polish display formatting).

pub mod formatting;
pub mod models;
pub mod services;

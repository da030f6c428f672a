//! Shared utilities for the camp portal backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Password hashing with Argon2id
//! - JWT token signing and validation for admin sessions
//! - Cryptographic digests and random identifiers
//! - Form validation rules with the portal's Polish messages

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;

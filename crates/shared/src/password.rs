//! Password hashing for admin accounts, using Argon2id.
//!
//! Hashes are stored in PHC string format so the parameters travel with the
//! hash and can be raised later without invalidating existing accounts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to verify password: {0}")]
    Verify(String),

    #[error("Invalid password hash format")]
    MalformedHash,
}

// Argon2id parameters per the OWASP password storage cheat sheet (2024):
// 19 MiB memory, 2 iterations, parallelism 1, 256-bit output.
const MEMORY_COST_KIB: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Hashes a plaintext password, returning a PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::Hash(format!("Invalid Argon2 params: {}", e)))?;
    let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);
    hasher
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` for a wrong password; errors are reserved for
/// malformed hashes or internal failures. Verification reads the parameters
/// embedded in the hash itself.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

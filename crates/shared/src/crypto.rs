//! Digest and random-identifier helpers.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of the input and returns it as a hex string.
///
/// Session rows store the hash of a token's `jti` rather than the value
/// itself, so a leaked database dump cannot be replayed as a session.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Generates a random lowercase-hex string of `2 * byte_len` characters.
///
/// Used for stored file names that must not collide (homepage images).
pub fn random_hex(byte_len: usize) -> String {
    let mut bytes = vec![0u8; byte_len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

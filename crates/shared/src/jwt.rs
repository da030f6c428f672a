//! JWT signing and validation for admin sessions.
//!
//! The portal issues an RS256-signed access/refresh token pair at login.
//! Each token carries a unique `jti`; the session store keeps a digest of it
//! so individual tokens can be revoked at logout.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Failed to decode token: {0}")]
    Decoding(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature => JwtError::Invalid,
            _ => JwtError::Decoding(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by every portal token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: String,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Unique token id, digested into the session row for revocation.
    pub jti: String,
    /// Access or refresh.
    pub token_type: TokenType,
}

impl Claims {
    fn issue(admin_id: Uuid, token_type: TokenType, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: admin_id.to_string(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }

    fn require(self, expected: TokenType) -> Result<Self, JwtError> {
        if self.token_type != expected {
            return Err(JwtError::Invalid);
        }
        Ok(self)
    }
}

/// Default clock-skew tolerance in seconds.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Signing/validation key pair plus expiry policy.
#[derive(Clone)]
pub struct JwtKeys {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    pub access_token_expiry_secs: i64,
    pub refresh_token_expiry_secs: i64,
    pub leeway_secs: u64,
}

impl JwtKeys {
    /// Builds keys from an RSA PEM pair with the default leeway.
    pub fn new(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
    ) -> Result<Self, JwtError> {
        Self::with_leeway(
            private_key_pem,
            public_key_pem,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            DEFAULT_LEEWAY_SECS,
        )
    }

    /// Builds keys from an RSA PEM pair with an explicit clock-skew leeway.
    pub fn with_leeway(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding_key: EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
                .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?,
            decoding_key: DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
                .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            leeway_secs,
        })
    }

    /// HS256 keys for unit tests only.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry_secs: 900,
            refresh_token_expiry_secs: 604800,
            leeway_secs: 0,
        }
    }

    /// Issues an access token for an admin. Returns `(token, jti)`.
    pub fn generate_access_token(&self, admin_id: Uuid) -> Result<(String, String), JwtError> {
        self.sign(Claims::issue(
            admin_id,
            TokenType::Access,
            self.access_token_expiry_secs,
        ))
    }

    /// Issues a refresh token for an admin. Returns `(token, jti)`.
    pub fn generate_refresh_token(&self, admin_id: Uuid) -> Result<(String, String), JwtError> {
        self.sign(Claims::issue(
            admin_id,
            TokenType::Refresh,
            self.refresh_token_expiry_secs,
        ))
    }

    fn sign(&self, claims: Claims) -> Result<(String, String), JwtError> {
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))?;
        Ok((token, claims.jti))
    }

    /// Validates any token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Validates a token and requires it to be an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token)?.require(TokenType::Access)
    }

    /// Validates a token and requires it to be a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token(token)?.require(TokenType::Refresh)
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("refresh_token_expiry_secs", &self.refresh_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Parses the admin id out of validated claims.
pub fn extract_admin_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::Invalid)
}

//! JWT service for session token issuance and validation
//!
//! Tokens are signed with HS256 using the configured secret and carry just
//! enough identity to answer "who am I" without a database round trip. They
//! are not stored server side, so a token stays valid until it expires.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

/// Lifetime of a session token in seconds (7 days)
pub const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// User email at issuance
    pub email: String,
    /// Display name at issuance
    pub name: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Token failures
///
/// Callers must not reveal which variant occurred to clients.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    /// Bad signature or malformed token
    #[error("Invalid token")]
    Invalid,

    /// Signature is fine but the token is past its expiry
    #[error("Token expired")]
    Expired,

    /// Encoding failed while signing
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Initialize a new JWT service from the signing secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a session token for a user, valid for [`SESSION_TTL_SECONDS`]
    pub fn sign(&self, user: &User) -> Result<String, TokenError> {
        self.sign_at(user, Utc::now().timestamp())
    }

    /// Sign a session token as if issued at `issued_at` (unix seconds)
    pub fn sign_at(&self, user: &User, issued_at: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECONDS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a token and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::HbError;
use crate::models::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Maximum allowed JWT size in bytes (4KB).
///
/// Typical tokens here are 250-400 bytes. Oversized tokens are rejected
/// before any base64 decoding or signature verification to bound the work
/// an unauthenticated caller can trigger.
pub const MAX_TOKEN_SIZE_BYTES: usize = 4096;

/// Dummy bcrypt hash verified when the identity key does not exist, so that
/// lookup misses and password mismatches take comparable time.
const DUMMY_PASSWORD_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Session token claims.
///
/// `sub` is the identity key (roll number or faculty ID) and should not be
/// exposed in logs; a custom Debug implementation redacts it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity key (roll number for students, faculty ID for faculty)
    pub sub: String,
    /// Role namespace the subject belongs to
    pub role: Role,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Unique token identifier
    pub jti: String,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("role", &self.role)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("jti", &"[REDACTED]")
            .finish()
    }
}

/// Sign session claims with HMAC-SHA256.
#[instrument(skip_all)]
pub fn sign_token(claims: &Claims, secret: &[u8]) -> Result<String, HbError> {
    let header = Header::new(Algorithm::HS256);
    encode(&header, claims, &EncodingKey::from_secret(secret))
        .map_err(|e| HbError::Crypto(format!("Token signing failed: {}", e)))
}

/// Verify a session token and extract its claims.
///
/// Validates:
/// - Token size (must be <= `MAX_TOKEN_SIZE_BYTES`)
/// - Signature (HS256)
/// - Expiration (`exp` claim)
///
/// The error reason is deliberately uniform; callers learn nothing about
/// which check failed.
#[instrument(skip_all)]
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, HbError> {
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        tracing::debug!(
            target: "crypto",
            token_size = token.len(),
            max_size = MAX_TOKEN_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(HbError::InvalidToken(
            "The access token is invalid or expired".to_string(),
        ));
    }

    let validation = Validation::new(Algorithm::HS256);

    let token_data =
        decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(|e| {
            tracing::debug!(target: "crypto", error = %e, "Token verification failed");
            HbError::InvalidToken("The access token is invalid or expired".to_string())
        })?;

    Ok(token_data.claims)
}

/// Hash a password with bcrypt using a configurable cost factor.
///
/// # Errors
///
/// Returns `HbError::Crypto` if the cost is outside the valid range (10-14)
/// or hashing fails.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, HbError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(HbError::Crypto(format!(
            "Invalid bcrypt cost: {} (must be {}-{})",
            cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| HbError::Crypto(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a bcrypt hash.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, HbError> {
    bcrypt::verify(password, hash)
        .map_err(|e| HbError::Crypto(format!("Password verification failed: {}", e)))
}

/// Run a bcrypt verification against a dummy hash.
///
/// Called when the identity key is unknown so that the response time does
/// not reveal whether the key exists.
#[instrument(skip_all)]
pub fn verify_dummy_password(password: &str) {
    let _ = bcrypt::verify(password, DUMMY_PASSWORD_HASH);
}

//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for bearer tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// JWT claims structure
#[derive(Debug, Deserialize)]
struct JwtClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub role: String,
}

/// Custom assertions for session tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_role("faculty")
///     .assert_for_subject("F1");
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a well-formed HS256 JWT
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token carries the specified role claim
    fn assert_role(&self, role: &str) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

fn decode_claims(token: &str) -> JwtClaims {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(parts.len(), 3, "JWT must have 3 parts, got {}", parts.len());

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .expect("Invalid JWT payload");
    serde_json::from_slice(&payload).expect("Failed to parse JWT claims")
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("Failed to base64 decode JWT header");
        let header: JwtHeader =
            serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON");

        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        // Claims must parse too.
        let claims = decode_claims(self);
        assert!(claims.exp > claims.iat, "Token expires before issuance");

        self
    }

    fn assert_role(&self, role: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.role, role,
            "Expected role '{}', got '{}'",
            role, claims.role
        );
        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.sub, subject,
            "Expected subject '{}', got '{}'",
            subject, claims.sub
        );
        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims = decode_claims(self);
        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;

        // 5-second tolerance for clock skew
        assert!(
            (expires_in - seconds).abs() <= 5,
            "Expected token to expire in ~{} seconds, got {}",
            seconds,
            expires_in
        );
        self
    }
}

use base64::{engine::general_purpose, Engine as _};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default token lifetime (matches the client's one-hour session expectation).
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// Default bcrypt cost factor (~200ms per hash on current hardware).
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Minimum acceptable bcrypt cost. Anything lower is insecure per OWASP 2024.
pub const MIN_BCRYPT_COST: u32 = 10;

/// Maximum acceptable bcrypt cost. Anything higher adds excessive latency.
pub const MAX_BCRYPT_COST: u32 = 14;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When absent the service falls back to the
    /// in-memory store (development and tests).
    pub database_url: Option<String>,
    pub bind_address: String,
    /// HMAC secret for token signing (exactly 32 bytes, base64 in the env).
    pub token_secret: Vec<u8>,
    pub token_expiry_seconds: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid token secret: {0}")]
    InvalidTokenSecret(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars.get("DATABASE_URL").cloned();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let token_secret_base64 = vars
            .get("HB_TOKEN_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("HB_TOKEN_SECRET".to_string()))?;

        let token_secret = general_purpose::STANDARD
            .decode(token_secret_base64)
            .map_err(ConfigError::Base64Error)?;

        if token_secret.len() != 32 {
            return Err(ConfigError::InvalidTokenSecret(format!(
                "Expected 32 bytes, got {}",
                token_secret.len()
            )));
        }

        let token_expiry_seconds = match vars.get("TOKEN_EXPIRY_SECONDS") {
            Some(raw) => {
                let parsed: i64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "TOKEN_EXPIRY_SECONDS".to_string(),
                    message: format!("not an integer: {raw}"),
                })?;
                if parsed <= 0 {
                    return Err(ConfigError::InvalidValue {
                        var: "TOKEN_EXPIRY_SECONDS".to_string(),
                        message: "must be positive".to_string(),
                    });
                }
                parsed
            }
            None => DEFAULT_TOKEN_EXPIRY_SECONDS,
        };

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(raw) => {
                let parsed: u32 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "BCRYPT_COST".to_string(),
                    message: format!("not an integer: {raw}"),
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&parsed) {
                    return Err(ConfigError::InvalidValue {
                        var: "BCRYPT_COST".to_string(),
                        message: format!("must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST}"),
                    });
                }
                parsed
            }
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(Config {
            database_url,
            bind_address,
            token_secret,
            token_expiry_seconds,
            bcrypt_cost,
        })
    }
}

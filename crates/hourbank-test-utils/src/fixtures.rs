//! Deterministic configuration fixtures for reproducible tests.

use hourbank_service::config::{Config, MIN_BCRYPT_COST};

/// Fixed 32-byte token-signing secret shared by all tests.
pub const TEST_TOKEN_SECRET: [u8; 32] = [0x42; 32];

/// Build a test configuration: fixed token secret, in-memory storage, and the
/// lowest accepted bcrypt cost so password hashing stays fast in tests.
pub fn test_config() -> Config {
    Config {
        database_url: None,
        bind_address: "127.0.0.1:0".to_string(),
        token_secret: TEST_TOKEN_SECRET.to_vec(),
        token_expiry_seconds: 3600,
        bcrypt_cost: MIN_BCRYPT_COST,
    }
}

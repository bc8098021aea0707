//! # Hour-bank test utilities
//!
//! Shared test utilities for the hour-bank service:
//! - Deterministic config fixtures (fixed token secret, fast bcrypt cost)
//! - Server test harness (`TestServer` for E2E tests)
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hourbank_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestServer::spawn().await?;
//!     server.register_faculty("F1", "Dr. A", "secret").await?;
//!     let token = server.login_faculty("F1", "secret").await?;
//!
//!     token.assert_valid_jwt().assert_role("faculty");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod server_harness;

pub use assertions::*;
pub use fixtures::*;
pub use server_harness::*;

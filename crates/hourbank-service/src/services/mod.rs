//! Business logic layer.
//!
//! - `token_service` - Session Issuer: credential checks and token issuance
//! - `registration_service` - role-specific account creation
//! - `identity_service` - Identity Resolver: claims to profile
//! - `program_service` - role-gated program listing/creation
//! - `transaction_service` - credit awards and per-role listings

pub mod identity_service;
pub mod program_service;
pub mod registration_service;
pub mod token_service;
pub mod transaction_service;

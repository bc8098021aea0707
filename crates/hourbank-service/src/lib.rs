//! HourBank Service Library
//!
//! Backend service for the campus hour-bank credit system: students accrue
//! credits by attending faculty-run programs; faculty create programs and
//! award credits.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Token signing/verification and password hashing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer-token authentication layer
//! - `models` - Data models and wire types
//! - `observability` - Metrics definitions
//! - `routes` - Router assembly
//! - `services` - Business logic layer
//! - `store` - Storage ports and adapters

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
pub mod store;

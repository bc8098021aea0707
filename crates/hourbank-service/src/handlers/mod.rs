//! HTTP handlers. Thin layer between axum extraction and the services.

pub mod auth_handler;
pub mod directory_handler;
pub mod program_handler;
pub mod transaction_handler;
pub mod user_handler;

use crate::config::Config;
use crate::store::Store;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

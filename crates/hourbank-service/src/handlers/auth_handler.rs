use crate::errors::HbError;
use crate::handlers::AppState;
use crate::models::{RegisterResponse, TokenResponse};
use crate::services::{registration_service, token_service};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Handle a login request.
///
/// POST /login
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<token_service::LoginRequest>,
) -> Result<Json<TokenResponse>, HbError> {
    let response = token_service::login(state.store.as_ref(), &state.config, payload).await?;
    Ok(Json(response))
}

/// Handle a registration request.
///
/// POST /register
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<registration_service::RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), HbError> {
    let response =
        registration_service::register(state.store.as_ref(), &state.config, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

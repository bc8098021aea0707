use crate::crypto::Claims;
use crate::errors::HbError;
use crate::handlers::AppState;
use crate::models::Program;
use crate::services::program_service;
use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;

/// List all programs.
///
/// GET /programs
pub async fn handle_list_programs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Program>>, HbError> {
    let programs = program_service::list_programs(state.store.as_ref()).await?;
    Ok(Json(programs))
}

/// Create a program. Faculty only.
///
/// POST /programs
pub async fn handle_create_program(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<program_service::CreateProgramRequest>,
) -> Result<(StatusCode, Json<Program>), HbError> {
    let program = program_service::create_program(state.store.as_ref(), &claims, payload).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

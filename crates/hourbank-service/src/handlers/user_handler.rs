use crate::crypto::Claims;
use crate::errors::HbError;
use crate::handlers::AppState;
use crate::models::IdentityResponse;
use crate::services::identity_service;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;

/// Resolve the authenticated caller to a role and profile.
///
/// GET /user
pub async fn handle_identity(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<IdentityResponse>, HbError> {
    let response = identity_service::resolve(state.store.as_ref(), &claims).await?;
    Ok(Json(response))
}

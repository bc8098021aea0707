use crate::crypto;
use crate::errors::HbError;
use crate::handlers::AppState;
use crate::observability::metrics::record_token_validation;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Authentication middleware for the protected surface.
///
/// Extracts the bearer token from the Authorization header, verifies it, and
/// stores the claims in request extensions for downstream handlers. Every
/// failure mode returns the same 401 so callers cannot distinguish a missing
/// header from a bad signature.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HbError> {
    let claims = verify_bearer(&state, &req);
    record_token_validation(if claims.is_ok() { "success" } else { "failure" });
    req.extensions_mut().insert(claims?);

    Ok(next.run(req).await)
}

fn verify_bearer(state: &AppState, req: &Request) -> Result<crypto::Claims, HbError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| HbError::InvalidToken("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        HbError::InvalidToken("Invalid Authorization header format".to_string())
    })?;

    crypto::verify_token(token, &state.config.token_secret)
}

use crate::crypto::Claims;
use crate::errors::HbError;
use crate::handlers::AppState;
use crate::models::Transaction;
use crate::services::transaction_service;
use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;

/// List transactions visible to the caller: sent for faculty, received for
/// students.
///
/// GET /transactions
pub async fn handle_list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Transaction>>, HbError> {
    let transactions =
        transaction_service::list_transactions(state.store.as_ref(), &claims).await?;
    Ok(Json(transactions))
}

/// Award credits to a student. Faculty only.
///
/// POST /transactions
pub async fn handle_create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<transaction_service::CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), HbError> {
    let transaction =
        transaction_service::create_transaction(state.store.as_ref(), &claims, payload).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

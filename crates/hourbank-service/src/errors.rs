use crate::models::Role;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HbError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Role not permitted: requires {required}")]
    RoleNotPermitted { required: Role },

    #[error("Identity key already registered")]
    DuplicateIdentity,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for HbError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            HbError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "An internal database error occurred".to_string(),
            ),
            HbError::Crypto(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CRYPTO_ERROR",
                "An internal cryptographic error occurred".to_string(),
            ),
            HbError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            HbError::InvalidToken(reason) => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", reason.clone())
            }
            HbError::RoleNotPermitted { required } => (
                StatusCode::FORBIDDEN,
                "ROLE_NOT_PERMITTED",
                format!("Requires role: {required}"),
            ),
            HbError::DuplicateIdentity => (
                StatusCode::CONFLICT,
                "DUPLICATE_IDENTITY",
                "Identity key already registered".to_string(),
            ),
            HbError::Validation(reason) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", reason.clone())
            }
            HbError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{what} not found"),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

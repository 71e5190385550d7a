//! API error taxonomy and HTTP mapping.
//!
//! Validation and authorization errors are detected before any store access.
//! Store-level failures are caught here and mapped to a generic 500 with a
//! safe message; the underlying cause is logged for operators.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use deck_db::error::DatabaseError;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input shape or enum value.
    #[error("{0}")]
    Validation(String),

    /// Missing or wrong shared secret.
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown task id.
    #[error("task '{0}' not found")]
    NotFound(String),

    /// Duplicate id on create.
    #[error("{0}")]
    Conflict(String),

    /// Backing store failure; the cause is logged, never returned.
    #[error("internal server error")]
    Storage(#[source] DatabaseError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(cause) => {
                tracing::error!(error = %cause, "storage failure at API boundary");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::Validation(msg) => Self::Validation(msg),
            DatabaseError::NotFound(id) => Self::NotFound(id),
            DatabaseError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Storage(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

//! Unified error handling
//!
//! [`AppError`] is the application-level error type returned by handlers
//! and converted to an HTTP response with the standard envelope body.
//!
//! | Variant      | Status | Body `mensaje`                 |
//! |--------------|--------|--------------------------------|
//! | `Validation` | 400    | the validation message         |
//! | `NotFound`   | 404    | the not-found message          |
//! | `Database`   | 500    | `"Error interno del servidor"` |
//! | `Internal`   | 500    | `"Error interno del servidor"` |
//!
//! Database and internal errors never leak their underlying text to the
//! client; the detail is logged and a fixed message is returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::response::ApiResponse;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// Missing or malformed input (400)
    Validation(String),

    #[error("Not found: {0}")]
    /// Unknown identifier (404)
    NotFound(String),

    #[error("Database error: {0}")]
    /// Query or connection failure (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Anything else unexpected (500)
    Internal(String),
}

/// Result type used by HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensaje) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::error(mensaje))).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

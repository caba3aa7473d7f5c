//! HTTP-facing error type.
//!
//! Handlers return `Result<_, ApiError>`. Client-caused failures carry their
//! message through to the response body; anything internal is logged and
//! replaced with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error response body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    // ---
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing request fields.
    #[error("{0}")]
    Validation(String),

    /// Missing, expired, mismatched, or replayed one-time code.
    #[error("{0}")]
    InvalidOtp(String),

    /// Missing or invalid bearer session.
    #[error("{0}")]
    Unauthorized(String),

    /// Policy violation, e.g. the phone number has already used the service.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Collaborator or storage failure. The message is what the client sees;
    /// the source is only logged.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    // ---

    /// Wrap an unexpected failure with the generic message shown to clients.
    pub fn internal(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        // ---
        move |source| ApiError::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        // ---
        match self {
            ApiError::Validation(_) | ApiError::InvalidOtp(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        match &self {
            ApiError::Internal { message, source } => {
                tracing::error!("{message}: {source:#}");
            }
            other => {
                tracing::warn!(status = status.as_u16(), "Request rejected: {other}");
            }
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

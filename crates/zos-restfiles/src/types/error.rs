//! Request error taxonomy and the JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::MalformedAddress;
use crate::mode::ModeError;

/// Why a request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum RequestError {
    /// Missing or invalid parameter or body.
    #[error("{0}")]
    #[diagnostic(code(zos_restfiles::validation))]
    Validation(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Mode(#[from] ModeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedAddress(#[from] MalformedAddress),

    /// The native layer reported a failure.
    #[error("{message}")]
    #[diagnostic(code(zos_restfiles::collaborator))]
    Collaborator { message: String, details: String },

    #[error("{0}")]
    #[diagnostic(code(zos_restfiles::not_found))]
    NotFound(String),
}

impl RequestError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Error response body: `{"error": ..., "details": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
    /// Underlying cause; repeats `error` for request validation failures.
    pub details: String,
}

/// HTTP status paired with an error body.
#[derive(Debug)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ErrorResponse {
    fn new(status: StatusCode, error: String, details: String) -> Self {
        Self {
            status,
            body: ErrorBody { error, details },
        }
    }

    /// 400 with the message repeated as details.
    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(StatusCode::BAD_REQUEST, message.clone(), message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(StatusCode::NOT_FOUND, "Not Found".to_string(), message)
    }

    /// Wraps an extractor rejection; `error` is the status reason.
    pub fn rejection(status: StatusCode, details: impl Into<String>) -> Self {
        let reason = status.canonical_reason().unwrap_or("Bad Request");
        Self::new(status, reason.to_string(), details.into())
    }

    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            details.into(),
        )
    }
}

impl From<RequestError> for ErrorResponse {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Validation(_)
            | RequestError::Mode(_)
            | RequestError::MalformedAddress(_) => Self::bad_request(err.to_string()),
            RequestError::Collaborator { message, details } => Self::internal(message, details),
            RequestError::NotFound(message) => Self::not_found(message),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                error = %self.body.error,
                details = %self.body.details,
                "Server error response"
            );
        } else if self.status.is_client_error() {
            tracing::warn!(
                status = %self.status.as_u16(),
                error = %self.body.error,
                "Client error response"
            );
        }

        (self.status, axum::Json(self.body)).into_response()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.body.error)
    }
}

impl std::error::Error for ErrorResponse {}

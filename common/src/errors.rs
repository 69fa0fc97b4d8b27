//! Error types shared by all handlers.
//!
//! Every failure a handler can produce is an `AppError`. Each variant maps to
//! exactly one caller-visible status code, except `Upstream`, which forwards
//! the status the third-party API returned.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorResponse;

/// Result alias used across services and handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Caller-facing error taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// The requested user or city does not exist upstream.
    #[error("{0}")]
    NotFound(String),

    /// Upstream refused the call for a reason other than rate limiting.
    #[error("{0}")]
    Forbidden(String),

    /// Upstream rate limit detected.
    #[error("{0}")]
    TooManyRequests(String),

    /// Upstream unreachable, timed out, or returned a success missing required fields.
    #[error("{0}")]
    BadGateway(String),

    /// Any other non-2xx upstream response, forwarded with its own status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// Local misconfiguration or an upstream payload that could not be decoded.
    #[error("{0}")]
    Internal(String),

    /// Invalid request input.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Returns the HTTP status code sent to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Upstream { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Returns the machine-readable error code placed in the envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::TooManyRequests(_) => "TOO_MANY_REQUESTS",
            AppError::BadGateway(_) => "BAD_GATEWAY",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, code = self.code(), error = %self, "request rejected");
        }

        let body = ErrorResponse::new(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the board backend. Each
 * variant maps to exactly one HTTP status code, so callers branch on the
 * variant rather than inspecting messages.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend error taxonomy
///
/// Component-internal errors are caught at the request boundary only;
/// there are no retries anywhere in scope. A transient store failure
/// surfaces to the caller as a 500.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Duplicate email, or a replace that matched nothing after the
    /// existence check succeeded (lost update race)
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or missing/invalid session token
    #[error("{0}")]
    Auth(String),

    /// Identifier resolved to nothing in the store
    #[error("{0}")]
    NotFound(String),

    /// Document store or media host failure
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Upstream(format!("store error: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Upstream(format!("serialization error: {}", err))
    }
}

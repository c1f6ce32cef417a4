//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; the taxonomy translates 1:1 to status codes, and
//! error bodies are JSON `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use voicedesk_core::{AgentNameError, AssistantIdError, PublicKeyError};

use crate::db::StoreError;

/// Application-level error type for the console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-policy input. The message names the offending
    /// field or rule and is safe to return to the client.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, expired, or invalid session, or a bad password.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate agent name.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Key-value store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Required server configuration is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry; client errors are expected
        if matches!(
            self,
            Self::Store(_) | Self::Configuration(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Configuration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Validation(msg) => msg.clone(),
            Self::Unauthorized => "Unauthorized".to_owned(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Conflict(msg) => msg.clone(),
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Configuration(_) => "Server configuration error".to_owned(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<crate::db::UpdateError> for AppError {
    fn from(err: crate::db::UpdateError) -> Self {
        match err {
            crate::db::UpdateError::NotFound => Self::NotFound("Agent".to_owned()),
            crate::db::UpdateError::Store(store) => Self::Store(store),
        }
    }
}

impl From<AgentNameError> for AppError {
    fn from(err: AgentNameError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<AssistantIdError> for AppError {
    fn from(err: AssistantIdError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PublicKeyError> for AppError {
    fn from(err: PublicKeyError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Client errors become 400/404
//! responses carrying their message; store failures are logged, captured to
//! Sentry and answered with a generic 500 that never includes store error
//! text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use stockroom_core::ValidationError;
use thiserror::Error;

use crate::codec::CodecError;
use crate::db::RepositoryError;

/// Tracing target of server-error logs. These are already captured to Sentry
/// by [`AppError::into_response`], so the Sentry tracing layer ignores them.
pub const CAPTURED_TARGET: &str = "stockroom_api::captured";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier, malformed body or missing required field.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store failed or timed out. `context` is what the client sees.
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: RepositoryError,
    },
}

impl AppError {
    /// Wrap a repository failure with a client-safe description.
    pub fn storage(context: impl Into<String>, source: RepositoryError) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Storage { context, .. } => context,
        }
    }
}

impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if let Self::Storage { source, .. } = &self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                target: CAPTURED_TARGET,
                error = %self,
                cause = %source,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Client error");
        }

        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

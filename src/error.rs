//! Error types for repositories and HTTP endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::api::ApiResponse;

/// Errors raised by a repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An underlying SQLite error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored document could not be encoded or decoded.
    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A thread panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The blocking storage task was cancelled or panicked.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl<T> From<std::sync::PoisonError<T>> for RepositoryError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        RepositoryError::Poisoned
    }
}

/// Errors returned by endpoint operations and rendered as HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No document with this id exists in the collection.
    #[error("{collection} document not found: {id}")]
    NotFound { collection: &'static str, id: String },

    /// Repository failures are passed through unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Body text for 500 responses; the detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the client.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::NotFound { .. } => self.to_string(),
            ApiError::Repository(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Json(ApiResponse::<()>::err(self.client_message()))).into_response()
    }
}

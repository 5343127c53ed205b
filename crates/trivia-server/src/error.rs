//! Error types for the game API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Caller faults map to 4xx; store faults map to 500 with a generic
//! message, and the underlying cause is logged instead of returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use trivia_db::DbError;

use crate::questions::QuestionStoreError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submission body is missing fields or has the wrong types.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// An invalid query parameter was provided.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// No route matched.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The question file could not be served.
    #[error("question store error: {0}")]
    Questions(#[from] QuestionStoreError),

    /// The leaderboard database failed.
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidPayload(_) | Self::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Questions(e) => {
                tracing::error!(error = %e, "Could not load questions");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Could not load questions."),
                )
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "Leaderboard database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Database operation failed."),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

//! Application error type mapping to HTTP status codes.
//!
//! Error bodies are `{ "error": <description> }`. Upstream completion
//! failures and internal failures both map to 500 but carry distinct
//! error codes so clients can tell them apart.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use halcyon_core::chat::service::ChatError;
use halcyon_core::comment::service::CommentError;
use halcyon_types::user::AuthError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed, or invalid credential.
    Unauthorized(String),
    /// Request failed validation.
    BadRequest(String),
    /// Resource does not exist.
    NotFound(String),
    /// The completion engine failed or returned nothing.
    Upstream(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Unauthorized(e.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::EmptyMessage => ApiError::BadRequest("Message is required".to_string()),
            ChatError::Upstream(e) => ApiError::Upstream(e.to_string()),
            ChatError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(e: CommentError) -> Self {
        match e {
            CommentError::EmptyText => ApiError::BadRequest("Comment text is required".to_string()),
            CommentError::NotFound => ApiError::NotFound("Comment not found".to_string()),
            CommentError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Upstream(msg) => {
                tracing::error!(error = %msg, "completion engine failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    "Failed to generate a response".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

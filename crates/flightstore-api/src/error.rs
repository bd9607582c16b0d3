//! Error types for the HTTP boundary.
//!
//! [`ApiError`] maps every failure onto a status code and a JSON body via
//! its [`IntoResponse`] implementation. Validation failures become 400,
//! a missing flight 404, and anything from the store 500. Store details
//! are logged here and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flightstore_core::QueryError;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed or failed validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested flight does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store or another internal component failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => {
                tracing::warn!(error = %msg, "rejected request");
                (StatusCode::BAD_REQUEST, msg)
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("internal server error"),
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

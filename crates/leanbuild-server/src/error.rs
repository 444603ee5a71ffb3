//! HTTP error mapping.
//!
//! Two handled kinds: validation failures become 400 with a static message;
//! everything else becomes a generic 500. Underlying errors are logged
//! server-side and never leak into response bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use leanbuild::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was missing or blank; reported to the client as-is.
    #[error("{0}")]
    Validation(String),

    /// Failure from the query-execution layer.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Any other unexpected failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::Db(err) => {
                error!(error = %err, "database request failed");
                internal_response()
            }
            Self::Internal(message) => {
                error!(error = %message, "request failed");
                internal_response()
            }
        }
    }
}

fn internal_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}

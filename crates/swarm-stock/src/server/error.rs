//! API error type with response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (empty query)
    #[error("{0}")]
    BadRequest(String),

    /// The graph never initialized; the process is degraded
    #[error("Graph failed to initialize: {0}")]
    GraphUnavailable(String),

    /// Model invocation or other internal failure during a run
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::GraphUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

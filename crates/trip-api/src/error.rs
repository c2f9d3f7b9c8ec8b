//! Error types for the HTTP endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use trip_core::AgentError;

/// Errors returned by the API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was well-formed but unusable.
    #[error("{0}")]
    InvalidRequest(String),

    /// No agent is configured.
    #[error("{0}")]
    Unavailable(String),

    /// The agent failed to answer.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Resource does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable_error"),
            ApiError::Agent(AgentError::Configuration(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "configuration_error")
            }
            ApiError::Agent(_) => (StatusCode::INTERNAL_SERVER_ERROR, "agent_error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status.as_u16(), self);
        } else {
            tracing::warn!("Rejected request ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "type": error_type
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

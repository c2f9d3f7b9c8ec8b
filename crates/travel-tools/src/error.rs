//! Error types for tool operations.

use thiserror::Error;

use crate::calculator::CalculatorError;

/// Errors that can occur during tool execution.
///
/// These never reach the agent runtime directly: the
/// [`RegistryToolExecutor`](crate::RegistryToolExecutor) renders them as
/// `"Error: <message>"` text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool or upstream item not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Arithmetic validation failed.
    #[error("{0}")]
    Calculation(#[from] CalculatorError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Upstream service answered with a non-success status.
    #[error("{service} returned status {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    /// Upstream data did not contain the requested entry.
    #[error("{0} is not available")]
    Unavailable(String),

    /// A required setting (e.g. API key) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// General execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

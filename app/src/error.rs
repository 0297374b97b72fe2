//! Error types for the todos API client

use thiserror::Error;

/// Errors that can occur when fetching todos
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, DNS, TLS, ...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    ApiStatus {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body was not a todo list
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}

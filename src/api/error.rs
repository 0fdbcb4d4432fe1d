//! API error types for the GraphQL transport.

use thiserror::Error;

use super::types::GraphQlError;

/// Errors that can occur while executing a GraphQL operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-empty `errors` array.
    #[error("{}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the endpoint.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Authentication or authorization was refused by the endpoint.
    #[error("Access denied by the GraphQL endpoint")]
    Forbidden,

    /// GraphQL server error.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response could not be understood.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A failure injected by the mock backend.
    #[error("{0}")]
    Mock(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

fn join_messages(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return "GraphQL error".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 | 403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }

    /// Create a GraphQL error with a single message.
    pub fn graphql(message: impl Into<String>) -> Self {
        ApiError::GraphQl(vec![GraphQlError {
            message: message.into(),
        }])
    }

    /// Whether a read may be retried after this error.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::Network(_)
        )
    }
}

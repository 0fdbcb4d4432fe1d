//! Top-level error type.
//!
//! Module errors (`ConfigError`, `ApiError`, `ValidationError`) convert into
//! [`AppError`] with `?`. The footer shows [`AppError::user_message`], never
//! the raw `Display` output.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    /// A validation schema rejected a snapshot.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Terminal or event polling failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// A short message for the status line.
    ///
    /// GraphQL and mock errors carry server-authored text and are shown as is.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::ValidationError(msg)) => {
                format!("Invalid setting: {}", msg)
            }
            AppError::Config(ConfigError::ParseError(_)) => {
                "config.toml is not valid TOML; fix it or delete it to restore defaults."
                    .to_string()
            }
            AppError::Config(e) => format!("Configuration unavailable ({})", e),
            AppError::Api(e) => api_message(e),
            AppError::Validation(e) => e.message.clone(),
            AppError::Io(e) => format!("Terminal I/O failed: {}", e),
        }
    }

    /// Whether the user can keep working (retry, fix input) after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Validation(_) => true,
            AppError::Api(e) => {
                e.is_transient()
                    || matches!(
                        e,
                        ApiError::GraphQl(_) | ApiError::Mock(_) | ApiError::NotFound(_)
                    )
            }
            AppError::Config(_) | AppError::Io(_) => false,
        }
    }
}

fn api_message(error: &ApiError) -> String {
    match error {
        ApiError::GraphQl(_) | ApiError::Mock(_) => error.to_string(),
        ApiError::NotFound(what) => format!("Nothing found for {}", what),
        ApiError::RateLimited => "The endpoint is throttling requests; retry shortly.".to_string(),
        ApiError::Forbidden => "The endpoint rejected the request (403).".to_string(),
        ApiError::ServerError(_) => "The GraphQL server failed; press r to retry.".to_string(),
        ApiError::Network(_) => "Cannot reach the GraphQL endpoint.".to_string(),
        ApiError::InvalidUrl(url) => format!("Endpoint '{}' is not a valid URL.", url),
        ApiError::InvalidResponse(_) => "The endpoint returned a malformed response.".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

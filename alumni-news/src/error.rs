//! Error types for the news module

use thiserror::Error;

/// Errors that can occur while fetching or normalizing news
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed (transport error or timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Upstream returned a non-success response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from upstream
        message: String,
    },

    /// Failed to parse a feed or API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid or missing configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every upstream attempt came back empty
    #[error("No articles available: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        NewsError::RequestFailed(err.to_string())
    }
}

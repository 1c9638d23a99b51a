//! Photos API error types.

use thiserror::Error;

/// Photos API error type.
#[derive(Debug, Error)]
pub enum PhotosError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Provider answered with a non-success status.
    #[error("Failed to fetch photos: {status} - {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PhotosError {
    /// Check if the provider rejected the access token.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, PhotosError::Upstream { status: 401 | 403, .. })
    }
}

/// Result type for Photos API operations.
pub type Result<T> = std::result::Result<T, PhotosError>;

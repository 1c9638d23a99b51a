//! Error types for the OAuth flow.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, OAuthError>;

/// Errors that can occur while talking to the provider's token endpoint.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// Network/HTTP transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// Token endpoint rejected the authorization code.
    #[error("Failed to exchange code for tokens: {status} - {body}")]
    TokenExchange { status: u16, body: String },

    /// Token endpoint rejected the refresh token.
    #[error("Failed to refresh access token: {status} - {body}")]
    TokenRefresh { status: u16, body: String },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Token payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OAuthError {
    /// HTTP status returned by the provider, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            OAuthError::TokenExchange { status, .. } | OAuthError::TokenRefresh { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OAuthError {
    fn from(e: reqwest::Error) -> Self {
        OAuthError::Network(e.to_string())
    }
}

//! Error types for the server.
//!
//! API routes answer with a JSON `{"error": ...}` body; the OAuth callback
//! answers with a redirect carrying an error code instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use photoreel_oauth::OAuthError;
use photoreel_photos::PhotosError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server error type for JSON API routes.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No usable session cookie on the request.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The Photos Library API call failed.
    #[error("Photos API request failed: {0}")]
    Upstream(#[from] PhotosError),

    /// The token endpoint rejected a refresh.
    #[error("Session refresh failed: {0}")]
    RefreshFailed(#[source] OAuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServerError::Upstream(_) | ServerError::RefreshFailed(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client. Upstream detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServerError::Unauthenticated => "Not authenticated",
            ServerError::Upstream(_) => "Failed to fetch photos",
            ServerError::RefreshFailed(_) => "Failed to refresh session",
            ServerError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %detail, "Server error");
        } else {
            tracing::warn!(status = %status, error = %detail, "Client error");
        }

        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OAuth callback errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failure while completing the authorization-code flow.
///
/// Rendered as a redirect to `/?error=<code>` so the landing page can show it.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// The callback arrived without an authorization code.
    #[error("No authorization code in callback")]
    MissingCode,

    /// The provider reported an error (e.g. `access_denied`).
    #[error("Provider returned error: {0}")]
    Provider(String),

    /// The code could not be exchanged for tokens.
    #[error("Token exchange failed: {0}")]
    Exchange(#[from] OAuthError),
}

impl AuthFlowError {
    /// Error code placed in the redirect query.
    pub fn redirect_code(&self) -> &str {
        match self {
            AuthFlowError::MissingCode => "no_code",
            AuthFlowError::Provider(code) => code,
            AuthFlowError::Exchange(_) => "auth_failed",
        }
    }

    /// Landing page location for this error.
    pub fn location(&self) -> String {
        format!("/?error={}", urlencoding::encode(self.redirect_code()))
    }
}

impl IntoResponse for AuthFlowError {
    fn into_response(self) -> Response {
        match &self {
            AuthFlowError::Exchange(e) => {
                tracing::error!(
                    error = %e,
                    provider_status = e.status(),
                    "Authentication error"
                );
            }
            other => tracing::warn!(error = %other, "Authentication rejected"),
        }

        Redirect::temporary(&self.location()).into_response()
    }
}

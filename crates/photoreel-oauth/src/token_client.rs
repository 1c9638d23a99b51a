//! Token endpoint client: authorization-code exchange and refresh.

use chrono::Utc;
use serde::Serialize;

use crate::error::{OAuthError, Result};
use crate::oauth::{AuthTokens, OAuthConfig, redact};

#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    grant_type: &'a str,
    redirect_uri: &'a str,
}

#[derive(Serialize)]
struct TokenRefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

/// Client for the provider's token endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl TokenClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: OAuthConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_http(http: reqwest::Client, config: OAuthConfig) -> Self {
        Self { http, config }
    }

    /// The OAuth configuration in use.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Issues exactly one POST; a non-success status is returned as
    /// [`OAuthError::TokenExchange`] carrying the status and body.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthTokens> {
        let form = TokenExchangeRequest {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            code,
            grant_type: "authorization_code",
            redirect_uri: &self.config.redirect_uri,
        };

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Token exchange request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "Token exchange error");
            return Err(OAuthError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let mut tokens: AuthTokens = response.json().await.map_err(|e| {
            OAuthError::Serialization(format!("Failed to parse token response: {}", e))
        })?;
        tokens.obtained_at = Some(Utc::now());

        tracing::info!(
            access_token = %tokens.redacted_access_token(),
            refresh_token = if tokens.refresh_token.is_some() { "present" } else { "none" },
            expires_in = tokens.expires_in,
            "Tokens received"
        );

        Ok(tokens)
    }

    /// Obtain a fresh access token using a refresh token.
    ///
    /// Providers usually omit the refresh token from refresh responses; the
    /// one passed in is carried over in that case.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let form = TokenRefreshRequest {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            refresh_token,
            grant_type: "refresh_token",
        };

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Token refresh request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                refresh_token = %redact(refresh_token),
                "Token refresh error"
            );
            return Err(OAuthError::TokenRefresh {
                status: status.as_u16(),
                body,
            });
        }

        let mut tokens: AuthTokens = response.json().await.map_err(|e| {
            OAuthError::Serialization(format!("Failed to parse refresh response: {}", e))
        })?;
        tokens.obtained_at = Some(Utc::now());
        if tokens.refresh_token.as_deref().is_none_or(str::is_empty) {
            tokens.refresh_token = Some(refresh_token.to_string());
        }

        tracing::info!(expires_in = tokens.expires_in, "Access token refreshed");
        Ok(tokens)
    }
}

/// Exchange an authorization code for tokens with a one-off client.
pub async fn exchange_code_for_tokens(config: &OAuthConfig, code: &str) -> Result<AuthTokens> {
    TokenClient::new(config.clone()).exchange_code(code).await
}

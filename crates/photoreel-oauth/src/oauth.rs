//! Provider endpoints, authorization URL and token payloads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Google's consent screen.
pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Read-only access to the user's photo library.
pub const PHOTOS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/photoslibrary.readonly";

/// OAuth client configuration.
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl OAuthConfig {
    /// Create a config pointing at Google's OAuth endpoints.
    pub fn google(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorize_url: GOOGLE_AUTHORIZE_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            redirect_uri: redirect_uri.into(),
            scopes: vec![PHOTOS_READONLY_SCOPE.to_string()],
        }
    }

    /// Override the token endpoint (mock servers, proxies).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the consent endpoint.
    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    /// Replace the requested scopes.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

/// Build the authorization URL the browser is sent to for consent.
///
/// Requests offline access and forces the consent prompt so the provider
/// issues a refresh token on every login.
pub fn build_authorization_url(config: &OAuthConfig) -> String {
    let scope = config.scopes.join(" ");
    let params = [
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("scope", scope.as_str()),
        ("response_type", "code"),
        ("access_type", "offline"),
        ("prompt", "consent"),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.authorize_url, query)
}

/// Tokens returned from the provider's token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Set locally when the payload is received; never sent by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obtained_at: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl AuthTokens {
    /// Wall-clock expiry of the access token, if the receipt time is known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = Duration::try_seconds(i64::try_from(self.expires_in).ok()?)?;
        self.obtained_at?.checked_add_signed(lifetime)
    }

    /// Shortened access token, safe to put in logs.
    pub fn redacted_access_token(&self) -> String {
        redact(&self.access_token)
    }
}

/// Keep the first few characters of a credential for log correlation.
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "none".to_string();
    }
    let prefix: String = secret.chars().take(8).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuthConfig {
        OAuthConfig::google(
            "client-123",
            "secret-xyz",
            "http://localhost:3000/api/auth/callback",
        )
    }

    #[test]
    fn test_authorization_url() {
        let url = build_authorization_url(&config());

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fcallback"
        ));
        assert!(url.contains(
            "scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fphotoslibrary.readonly"
        ));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(!url.contains("secret-xyz"));
    }

    #[test]
    fn test_authorization_url_joins_scopes_with_spaces() {
        let config = config().with_scopes(vec!["a".to_string(), "b".to_string()]);
        let url = build_authorization_url(&config);
        assert!(url.contains("scope=a%20b"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(rendered.contains("client-123"));
        assert!(!rendered.contains("secret-xyz"));
    }

    #[test]
    fn test_tokens_deserialize_minimal_payload() {
        let tokens: AuthTokens =
            serde_json::from_str(r#"{"access_token":"T","expires_in":3600}"#).unwrap();
        assert_eq!(tokens.access_token, "T");
        assert_eq!(tokens.expires_in, 3600);
        assert_eq!(tokens.token_type, "Bearer");
        assert!(tokens.refresh_token.is_none());
        assert!(tokens.obtained_at.is_none());
    }

    #[test]
    fn test_expiry() {
        let obtained = Utc::now();
        let tokens = AuthTokens {
            access_token: "T".to_string(),
            refresh_token: None,
            expires_in: 60,
            token_type: "Bearer".to_string(),
            scope: None,
            obtained_at: Some(obtained),
        };

        assert_eq!(tokens.expires_at(), Some(obtained + Duration::seconds(60)));

        let unstamped = AuthTokens {
            obtained_at: None,
            ..tokens
        };
        assert_eq!(unstamped.expires_at(), None);
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact(""), "none");
        assert_eq!(redact("abc"), "abc...");
        assert_eq!(redact("ya29.a0AfH6SMBxyz"), "ya29.a0A...");
    }
}

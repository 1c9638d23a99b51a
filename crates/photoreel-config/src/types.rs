//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [server]     # bind address, environment, cookies, logging
//! [oauth]      # provider credentials and endpoints
//! [photos]     # Library API root and page size
//! [client]     # where the CLI and TUI find the server
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default port the server listens on.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Default number of media items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page the Library API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default server URL used by clients.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Environment variable selecting the deployment environment.
pub const ENVIRONMENT_ENV: &str = "PHOTOREEL_ENV";

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoreelConfig {
    /// Server configuration.
    pub server: Option<ServerSection>,

    /// OAuth provider configuration.
    pub oauth: Option<OAuthSection>,

    /// Photos Library API configuration.
    pub photos: Option<PhotosSection>,

    /// Client (CLI/TUI) configuration.
    pub client: Option<ClientSection>,
}

impl PhotoreelConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: PhotoreelConfig) {
        if other.server.is_some() {
            self.server = other.server;
        }

        if other.oauth.is_some() {
            self.oauth = other.oauth;
        }

        if other.photos.is_some() {
            self.photos = other.photos;
        }

        if other.client.is_some() {
            self.client = other.client;
        }
    }

    /// Names of the sections present, in schema order.
    pub fn section_names(&self) -> Vec<&'static str> {
        [
            ("server", self.server.is_some()),
            ("oauth", self.oauth.is_some()),
            ("photos", self.photos.is_some()),
            ("client", self.client.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Server section, or defaults.
    pub fn server(&self) -> ServerSection {
        self.server.clone().unwrap_or_default()
    }

    /// Photos section, or defaults.
    pub fn photos(&self) -> PhotosSection {
        self.photos.clone().unwrap_or_default()
    }

    /// Client section, or defaults.
    pub fn client(&self) -> ClientSection {
        self.client.clone().unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if let Some(ref photos) = self.photos
            && (photos.page_size == 0 || photos.page_size > MAX_PAGE_SIZE)
        {
            return Err(ConfigError::InvalidValue {
                field: "photos.page_size".to_string(),
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse a `PHOTOREEL_ENV` style value. Unknown values are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Environment::Production),
            "development" | "dev" => Some(Environment::Development),
            _ => None,
        }
    }

    /// Read `PHOTOREEL_ENV`, if set to a known value.
    pub fn from_env() -> Option<Self> {
        std::env::var(ENVIRONMENT_ENV)
            .ok()
            .and_then(|v| Self::parse(&v))
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Port to listen on.
    pub port: u16,
    /// Address to bind to.
    pub bind: String,
    /// Deployment environment; `PHOTOREEL_ENV` takes precedence.
    pub environment: Environment,
    /// Force the `Secure` cookie flag on or off. Defaults to on in production.
    pub secure_cookies: Option<bool>,
    /// Enable request logging.
    pub request_logging: bool,
    /// CORS allowed origins (empty = no CORS).
    pub cors_origins: Vec<String>,
    /// Externally visible base URL, used to print the login link.
    pub public_url: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            environment: Environment::default(),
            secure_cookies: None,
            request_logging: true,
            cors_origins: Vec::new(),
            public_url: None,
        }
    }
}

impl ServerSection {
    /// Environment after applying `PHOTOREEL_ENV`.
    pub fn effective_environment(&self) -> Environment {
        Environment::from_env().unwrap_or(self.environment)
    }

    /// Whether session cookies carry the `Secure` flag.
    pub fn secure_cookies_for(&self, environment: Environment) -> bool {
        self.secure_cookies
            .unwrap_or(environment == Environment::Production)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OAuth Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// `[oauth]` section.
///
/// Credentials may be left out and supplied through the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthSection {
    /// OAuth client id.
    pub client_id: Option<String>,
    /// OAuth client secret (prefer `PHOTOREEL_CLIENT_SECRET`).
    pub client_secret: Option<String>,
    /// Redirect URI registered with the provider.
    pub redirect_uri: Option<String>,
    /// Override of the provider consent endpoint.
    pub authorize_url: Option<String>,
    /// Override of the provider token endpoint.
    pub token_url: Option<String>,
    /// Override of the requested scopes.
    pub scopes: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Photos Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// `[photos]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosSection {
    /// Override of the Library API root.
    pub api_base_url: Option<String>,
    /// Media items requested per page.
    pub page_size: u32,
}

impl Default for PhotosSection {
    fn default() -> Self {
        Self {
            api_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// `[client]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    /// Base URL of the Photoreel server.
    pub server_url: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = PhotoreelConfig::from_toml(
            r#"
[server]
port = 8080
bind = "0.0.0.0"
environment = "production"
cors_origins = ["http://localhost:5173"]

[oauth]
client_id = "abc.apps.googleusercontent.com"
redirect_uri = "https://photos.example.com/api/auth/callback"

[photos]
page_size = 25

[client]
server_url = "https://photos.example.com"
"#,
        )
        .unwrap();

        let server = config.server();
        assert_eq!(server.port, 8080);
        assert_eq!(server.bind, "0.0.0.0");
        assert_eq!(server.environment, Environment::Production);
        assert_eq!(server.cors_origins, vec!["http://localhost:5173"]);
        assert!(server.request_logging);

        let oauth = config.oauth.as_ref().unwrap();
        assert_eq!(
            oauth.client_id.as_deref(),
            Some("abc.apps.googleusercontent.com")
        );
        assert!(oauth.client_secret.is_none());

        assert_eq!(config.photos().page_size, 25);
        assert_eq!(config.client().server_url, "https://photos.example.com");
        assert_eq!(
            config.section_names(),
            vec!["server", "oauth", "photos", "client"]
        );
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = PhotoreelConfig::from_toml("").unwrap();
        assert_eq!(config.server().port, DEFAULT_PORT);
        assert_eq!(config.server().environment, Environment::Development);
        assert_eq!(config.photos().page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.client().server_url, DEFAULT_SERVER_URL);
        assert!(config.oauth.is_none());
        assert!(config.section_names().is_empty());
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(PhotoreelConfig::from_toml("[photos]\npage_size = 0").is_err());
        assert!(PhotoreelConfig::from_toml("[photos]\npage_size = 101").is_err());
        assert!(PhotoreelConfig::from_toml("[photos]\npage_size = 100").is_ok());
    }

    #[test]
    fn test_merge_overrides_sections() {
        let mut base = PhotoreelConfig::from_toml("[server]\nport = 1000\n[photos]\npage_size = 10")
            .unwrap();
        let overlay = PhotoreelConfig::from_toml("[server]\nport = 2000").unwrap();
        base.merge(overlay);

        assert_eq!(base.server().port, 2000);
        assert_eq!(base.photos().page_size, 10);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("production"), Some(Environment::Production));
        assert_eq!(Environment::parse(" PROD "), Some(Environment::Production));
        assert_eq!(Environment::parse("dev"), Some(Environment::Development));
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn test_secure_cookies_follow_environment() {
        let section = ServerSection::default();
        assert!(section.secure_cookies_for(Environment::Production));
        assert!(!section.secure_cookies_for(Environment::Development));

        let forced = ServerSection {
            secure_cookies: Some(true),
            ..Default::default()
        };
        assert!(forced.secure_cookies_for(Environment::Development));
    }
}

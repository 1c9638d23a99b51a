//! Application state shared across handlers.

use std::sync::Arc;

use photoreel_oauth::{TokenClient, build_authorization_url};
use photoreel_photos::PhotosClient;

use crate::config::ServerConfig;
use crate::session::CookiePolicy;

/// Application state shared across all handlers.
///
/// Read-only after construction; the session itself lives in cookies.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Token endpoint client (code exchange and refresh).
    pub oauth: TokenClient,

    /// Photos Library API client.
    pub photos: PhotosClient,

    /// Provider consent URL, built once at startup.
    pub authorization_url: Arc<str>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: ServerConfig, oauth: TokenClient, photos: PhotosClient) -> Self {
        let authorization_url = build_authorization_url(oauth.config());
        Self {
            config: Arc::new(config),
            oauth,
            photos,
            authorization_url: Arc::from(authorization_url),
        }
    }

    /// Cookie flags derived from the configuration.
    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy {
            secure: self.config.secure_cookies,
        }
    }
}

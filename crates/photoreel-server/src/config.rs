//! Server configuration.

use std::net::SocketAddr;

/// Default number of media items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Whether session cookies carry the `Secure` flag.
    pub secure_cookies: bool,

    /// Enable request logging.
    pub request_logging: bool,

    /// CORS allowed origins (empty = no CORS).
    pub cors_origins: Vec<String>,

    /// Media items requested from the provider per page.
    pub page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            secure_cookies: false,
            request_logging: true,
            cors_origins: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Turn the `Secure` cookie flag on or off.
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Enable or disable request logging.
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }

    /// Set CORS allowed origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Set the page size used for photo queries.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::new();
        assert_eq!(config.bind_address.port(), 3000);
        assert!(!config.secure_cookies);
        assert!(config.request_logging);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_builder() {
        let config = ServerConfig::new()
            .with_bind_address("0.0.0.0:9000".parse().unwrap())
            .with_secure_cookies(true)
            .with_request_logging(false)
            .with_cors_origins(vec!["http://localhost:5173".to_string()])
            .with_page_size(10);

        assert_eq!(config.bind_address.port(), 9000);
        assert!(config.secure_cookies);
        assert!(!config.request_logging);
        assert_eq!(config.cors_origins.len(), 1);
        assert_eq!(config.page_size, 10);
    }
}

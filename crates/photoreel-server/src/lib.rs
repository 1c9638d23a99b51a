//! HTTP server for Photoreel.
//!
//! Serves the OAuth sign-in flow, keeps the session in cookies and proxies
//! the "recent photos" query to the Google Photos Library API.
//!
//! # Routes
//!
//! | Method | Path                 | Purpose                                 |
//! |--------|----------------------|-----------------------------------------|
//! | GET    | `/`                  | Landing page with sign-in link          |
//! | GET    | `/health`            | Liveness probe                          |
//! | GET    | `/api/auth/login`    | Redirect to the provider consent screen |
//! | GET    | `/api/auth/callback` | Exchange the code, set session cookies  |
//! | POST   | `/api/auth/refresh`  | New access token from refresh cookie    |
//! | POST   | `/api/auth/logout`   | Clear session cookies                   |
//! | GET    | `/api/photos`        | Recent photos for the session           |
//!
//! # Example
//!
//! ```ignore
//! use photoreel_oauth::{OAuthConfig, TokenClient};
//! use photoreel_photos::PhotosClient;
//! use photoreel_server::{Server, ServerConfig};
//!
//! let oauth = TokenClient::new(OAuthConfig::google(id, secret, redirect_uri));
//! let photos = PhotosClient::builder().build()?;
//! let config = ServerConfig::new().with_bind_address("127.0.0.1:3000".parse()?);
//!
//! Server::new(config, oauth, photos).run().await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod session;
pub mod state;

pub use config::ServerConfig;
pub use error::{AuthFlowError, Result, ServerError};
pub use logging::{RouteName, request_logging_middleware};
pub use session::CookiePolicy;
pub use state::AppState;

use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use photoreel_oauth::TokenClient;
use photoreel_photos::PhotosClient;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// The Photoreel HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server from its configuration and upstream clients.
    pub fn new(config: ServerConfig, oauth: TokenClient, photos: PhotosClient) -> Self {
        Self {
            state: AppState::new(config, oauth, photos),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .route("/", get(routes::home_handler))
            .merge(routes::health_routes())
            .nest("/api", self.api_routes())
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                logging::request_logging_middleware,
            ))
            .layer(TraceLayer::new_for_http());

        if let Some(cors) = self.cors_layer() {
            router = router.layer(cors);
        }

        router.with_state(self.state.clone())
    }

    fn api_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/auth/login", get(routes::login_handler))
            .route("/auth/callback", get(routes::callback_handler))
            .route("/auth/refresh", post(routes::refresh_handler))
            .route("/auth/logout", post(routes::logout_handler))
            .route("/photos", get(routes::photos_handler))
    }

    /// Credentialed CORS for the configured origins, if any.
    fn cors_layer(&self) -> Option<CorsLayer> {
        let origins: Vec<HeaderValue> = self
            .state
            .config
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            return None;
        }

        Some(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        )
    }

    /// Run the server on the configured address.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        self.run_on(addr).await
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let router = self.router();

        info!(
            secure_cookies = self.state.config.secure_cookies,
            page_size = self.state.config.page_size,
            "Starting server on {}",
            addr
        );

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}

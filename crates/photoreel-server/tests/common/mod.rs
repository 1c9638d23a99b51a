//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use photoreel_oauth::{OAuthConfig, TokenClient};
use photoreel_photos::PhotosClient;
use photoreel_server::{Server, ServerConfig};
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use wiremock::MockServer;

/// Build a server whose token endpoint and Photos API point at `upstream`.
pub fn server_for(upstream: &MockServer, config: ServerConfig) -> Server {
    let oauth = TokenClient::new(
        OAuthConfig::google(
            "client-123",
            "secret-xyz",
            "http://localhost:3000/api/auth/callback",
        )
        .with_token_url(format!("{}/token", upstream.uri()))
        .with_authorize_url(format!("{}/auth", upstream.uri())),
    );
    let photos = PhotosClient::builder()
        .base_url(format!("{}/v1", upstream.uri()))
        .build()
        .expect("valid mock base url");

    Server::new(config, oauth, photos)
}

/// Router for in-process `oneshot` tests.
pub fn router_for(upstream: &MockServer) -> Router {
    server_for(upstream, ServerConfig::new().with_request_logging(false)).router()
}

/// Every `Set-Cookie` header on a response.
pub fn set_cookies(headers: &axum::http::HeaderMap) -> Vec<String> {
    headers
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `Set-Cookie` header for one cookie name.
pub fn set_cookie<'a>(cookies: &'a [String], name: &str) -> Option<&'a str> {
    let prefix = format!("{}=", name);
    cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .map(String::as_str)
}

/// A test server that runs in the background.
pub struct TestServer {
    /// The server's address.
    pub addr: SocketAddr,
    /// HTTP client that does not follow redirects.
    pub client: Client,
    /// Mocked provider (token endpoint and Photos API).
    pub upstream: MockServer,
    /// Handle to the server task.
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server backed by a fresh mock provider.
    pub async fn start() -> Result<Self> {
        let upstream = MockServer::start().await;
        let addr = find_available_port().await?;

        let config = ServerConfig::new()
            .with_bind_address(addr)
            .with_request_logging(false)
            .with_page_size(50);
        let server = server_for(&upstream, config);

        let handle = tokio::spawn(async move {
            let _ = server.run_on(addr).await;
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        wait_for_server(&client, addr).await?;

        Ok(Self {
            addr,
            client,
            upstream,
            _handle: handle,
        })
    }

    /// Get the base URL for the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// GET request builder.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url(), path))
    }

    /// POST request builder.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url(), path))
    }
}

/// Find an available port for the test server.
async fn find_available_port() -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

/// Wait for the server to become ready.
async fn wait_for_server(client: &Client, addr: SocketAddr) -> Result<()> {
    let url = format!("http://{}/health", addr);

    let result = timeout(Duration::from_secs(5), async {
        loop {
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return,
                _ => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
    })
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(_) => anyhow::bail!("Timeout waiting for server to start"),
    }
}

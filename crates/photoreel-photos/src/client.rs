//! Photos Library API client.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::{PhotosError, Result};
use crate::types::{MediaItemsPage, SearchRequest};

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://photoslibrary.googleapis.com/v1/";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Photos Library API client.
///
/// Holds no credentials: every call takes the user's access token, so one
/// client serves all sessions.
#[derive(Debug, Clone)]
pub struct PhotosClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl PhotosClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the API root.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build a URL for an API path.
    fn url(&self, path: &str) -> Result<Url> {
        // "./" keeps "mediaItems:search" from being parsed as a scheme
        let path = path.trim_start_matches('/');
        self.inner
            .base_url
            .join(&format!("./{}", path))
            .map_err(PhotosError::from)
    }

    /// Search the library for the most recent photos.
    ///
    /// One `POST mediaItems:search` filtered to photos.
    pub async fn search_recent(
        &self,
        access_token: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<MediaItemsPage> {
        let url = self.url("mediaItems:search")?;
        let body = SearchRequest::photos(page_size, page_token.map(str::to_string));

        tracing::debug!(page_size, has_page_token = page_token.is_some(), "Searching photos");

        let response = self
            .inner
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&body)
            .timeout(self.inner.timeout)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Decode a success body, or turn the status and body into an error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<MediaItemsPage> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!(status = status.as_u16(), body = %body, "Photos API request failed");

        Err(PhotosError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

/// Builder for creating a [`PhotosClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    http: Option<reqwest::Client>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            http: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the API root (mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Reuse an existing HTTP client.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent. Ignored when an HTTP client is supplied.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PhotosClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        // Url::join drops the last path segment unless it ends with '/'
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = match self.http {
            Some(http) => http,
            None => {
                let user_agent = self
                    .user_agent
                    .unwrap_or_else(|| format!("photoreel/{}", env!("CARGO_PKG_VERSION")));
                reqwest::Client::builder()
                    .user_agent(user_agent)
                    .build()
                    .map_err(|e| PhotosError::Config(e.to_string()))?
            }
        };

        Ok(PhotosClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! HTTP client for the Photoreel server.

use std::time::Duration;

use photoreel_photos::MediaItemsPage;
use reqwest::{StatusCode, header::COOKIE};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from talking to the server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server has no session for us (401).
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Any other non-success response.
    #[error("{message} (HTTP {status})")]
    Server { status: u16, message: String },

    /// Transport failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Bad server URL.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the server's photo API, carrying the session cookie.
#[derive(Debug, Clone)]
pub struct ServerClient {
    http: reqwest::Client,
    base_url: Url,
    cookie: Option<String>,
}

impl ServerClient {
    /// Create a client for `server_url`.
    ///
    /// `cookie` is a `Cookie` header value such as `auth_token=...`.
    pub fn new(server_url: &str, cookie: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: Url::parse(server_url)?,
            cookie: cookie.filter(|c| !c.is_empty()),
        })
    }

    /// Server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a session cookie will be sent.
    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// `GET /api/photos`.
    pub async fn fetch_photos(&self, page_token: Option<&str>) -> Result<MediaItemsPage, ClientError> {
        let mut url = self.base_url.join("/api/photos")?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }

        let mut request = self.http.get(url);
        if let Some(ref cookie) = self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::NotAuthenticated);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| "Failed to fetch photos".to_string());
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_sends_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/photos"))
            .and(header("cookie", "auth_token=T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mediaItems": [{ "id": "a", "baseUrl": "https://lh3.example/a", "mimeType": "image/jpeg" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServerClient::new(&server.uri(), Some("auth_token=T".to_string())).unwrap();
        let page = client.fetch_photos(None).await.unwrap();
        assert_eq!(page.media_items.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_forwards_page_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/photos"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServerClient::new(&server.uri(), None).unwrap();
        let page = client.fetch_photos(Some("p2")).await.unwrap();
        assert!(page.media_items.is_empty());
    }

    #[tokio::test]
    async fn test_401_is_not_authenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Not authenticated"})),
            )
            .mount(&server)
            .await;

        let client = ServerClient::new(&server.uri(), None).unwrap();
        assert!(!client.has_session());
        let err = client.fetch_photos(None).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch photos"})),
            )
            .mount(&server)
            .await;

        let client = ServerClient::new(&server.uri(), Some("auth_token=T".to_string())).unwrap();
        match client.fetch_photos(None).await.unwrap_err() {
            ClientError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch photos");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            ServerClient::new("not a url", None),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}

//! `GET /api/photos` against a mocked Photos Library API.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use photoreel_photos::MediaItemsPage;
use photoreel_server::ServerConfig;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{router_for, server_for};

fn photos_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_without_cookie_returns_401_and_skips_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(photos_request("/api/photos", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({"error": "Not authenticated"}));
}

#[tokio::test]
async fn test_relays_recent_photos() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:search"))
        .and(header_eq("authorization", "Bearer T"))
        .and(body_partial_json(json!({
            "pageSize": 50,
            "filters": { "mediaTypeFilter": { "mediaTypes": ["PHOTO"] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mediaItems": [{
                "id": "p1",
                "baseUrl": "https://lh3.example/p1",
                "mimeType": "image/jpeg",
                "mediaMetadata": { "creationTime": "2024-05-01T10:00:00Z", "width": "4000", "height": "3000" },
                "filename": "IMG_0001.jpg"
            }],
            "nextPageToken": "next"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(photos_request("/api/photos", Some("auth_token=T")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: MediaItemsPage = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(page.media_items.len(), 1);
    assert_eq!(page.media_items[0].id, "p1");
    assert_eq!(page.media_items[0].title(), "IMG_0001.jpg");
    assert_eq!(page.next_page_token.as_deref(), Some("next"));
}

#[tokio::test]
async fn test_forwards_page_token_and_configured_page_size() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:search"))
        .and(body_partial_json(json!({ "pageSize": 12, "pageToken": "abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = server_for(
        &upstream,
        ServerConfig::new()
            .with_request_logging(false)
            .with_page_size(12),
    )
    .router();

    let response = app
        .oneshot(photos_request("/api/photos?pageToken=abc", Some("auth_token=T")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: MediaItemsPage = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(page.media_items.is_empty());
}

#[tokio::test]
async fn test_upstream_failure_returns_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(photos_request("/api/photos", Some("auth_token=T")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({"error": "Failed to fetch photos"}));
}

#[tokio::test]
async fn test_expired_token_is_still_a_fetch_failure() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&upstream)
        .await;

    let response = router_for(&upstream)
        .oneshot(photos_request("/api/photos", Some("auth_token=expired")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

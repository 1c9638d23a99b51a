//! Token endpoint integration tests against a mock provider.

use photoreel_oauth::{OAuthConfig, OAuthError, TokenClient, exchange_code_for_tokens};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> OAuthConfig {
    OAuthConfig::google("client-123", "secret-xyz", "http://localhost:3000/api/auth/callback")
        .with_token_url(format!("{}/token", server.uri()))
}

#[tokio::test]
async fn test_exchange_posts_form_and_parses_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc"))
        .and(body_string_contains("client_id=client-123"))
        .and(body_string_contains("client_secret=secret-xyz"))
        .and(body_string_contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T",
            "refresh_token": "R",
            "expires_in": 3600,
            "token_type": "Bearer",
            "scope": "https://www.googleapis.com/auth/photoslibrary.readonly"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = exchange_code_for_tokens(&config_for(&server), "abc")
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "T");
    assert_eq!(tokens.refresh_token.as_deref(), Some("R"));
    assert_eq!(tokens.expires_in, 3600);
    assert!(tokens.obtained_at.is_some());
}

#[tokio::test]
async fn test_exchange_failure_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = TokenClient::new(config_for(&server))
        .exchange_code("expired")
        .await
        .unwrap_err();

    match err {
        OAuthError::TokenExchange { status, ref body } => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_exchange_rejects_malformed_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = TokenClient::new(config_for(&server))
        .exchange_code("abc")
        .await
        .unwrap_err();
    assert!(matches!(err, OAuthError::Serialization(_)));
}

#[tokio::test]
async fn test_exchange_network_failure() {
    let config = OAuthConfig::google("id", "secret", "http://localhost/cb")
        .with_token_url("http://127.0.0.1:1/token");

    let err = TokenClient::new(config).exchange_code("abc").await.unwrap_err();
    assert!(matches!(err, OAuthError::Network(_)));
}

#[tokio::test]
async fn test_refresh_keeps_existing_refresh_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=R"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T2",
            "expires_in": 1800,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = TokenClient::new(config_for(&server))
        .refresh("R")
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "T2");
    assert_eq!(tokens.refresh_token.as_deref(), Some("R"));
    assert_eq!(tokens.expires_in, 1800);
}

#[tokio::test]
async fn test_refresh_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("revoked"))
        .mount(&server)
        .await;

    let err = TokenClient::new(config_for(&server))
        .refresh("R")
        .await
        .unwrap_err();
    assert!(matches!(err, OAuthError::TokenRefresh { status: 401, .. }));
}

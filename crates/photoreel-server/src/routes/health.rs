//! `GET /health`: liveness plus what the server knows about the caller.
//!
//! The session is only the request's cookies, so the report is computed
//! from them without contacting the provider. `photoreel status` uses it to
//! tell whether its saved cookies still count as a session.

use axum::{Json, Router, extract::State, routing::get};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::session::{refresh_token, session_token};
use crate::state::AppState;

/// What the request's cookies amount to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// An access token cookie is present.
    Active,
    /// Only the refresh token survived; `POST /api/auth/refresh` restores it.
    Refreshable,
    None,
}

impl SessionState {
    fn of(jar: &CookieJar) -> Self {
        if session_token(jar).is_some() {
            SessionState::Active
        } else if refresh_token(jar).is_some() {
            SessionState::Refreshable
        } else {
            SessionState::None
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server answers.
    pub status: String,
    pub version: String,
    pub session: SessionState,
    /// Whether session cookies are issued with `Secure`.
    pub secure_cookies: bool,
    /// Photos Library API host the server queries.
    pub photos_api: String,
}

pub async fn health(State(state): State<AppState>, jar: CookieJar) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        session: SessionState::of(&jar),
        secure_cookies: state.config.secure_cookies,
        photos_api: state
            .photos
            .base_url()
            .host_str()
            .unwrap_or_default()
            .to_string(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use photoreel_oauth::{OAuthConfig, TokenClient};
    use photoreel_photos::PhotosClient;
    use tower::ServiceExt;

    use crate::ServerConfig;

    fn app(secure_cookies: bool) -> Router {
        let oauth = TokenClient::new(OAuthConfig::google(
            "client-id",
            "secret",
            "http://localhost:3000/api/auth/callback",
        ));
        let photos = PhotosClient::builder()
            .base_url("http://photos.test:8080/v1")
            .build()
            .unwrap();
        let config = ServerConfig::new().with_secure_cookies(secure_cookies);
        health_routes().with_state(AppState::new(config, oauth, photos))
    }

    async fn check(app: Router, cookie: Option<&str>) -> HealthResponse {
        let mut request = Request::builder().uri("/health");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_without_cookies() {
        let health = check(app(false), None).await;
        assert_eq!(health.status, "ok");
        assert!(!health.version.is_empty());
        assert_eq!(health.session, SessionState::None);
        assert!(!health.secure_cookies);
        assert_eq!(health.photos_api, "photos.test");
    }

    #[tokio::test]
    async fn test_health_reports_cookie_session() {
        let active = check(app(true), Some("auth_token=T; refresh_token=R")).await;
        assert_eq!(active.session, SessionState::Active);
        assert!(active.secure_cookies);

        let refreshable = check(app(true), Some("refresh_token=R")).await;
        assert_eq!(refreshable.session, SessionState::Refreshable);

        let empty = check(app(true), Some("auth_token=")).await;
        assert_eq!(empty.session, SessionState::None);
    }
}

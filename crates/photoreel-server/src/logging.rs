//! Access log for the server's routes.
//!
//! Requests are logged by route name instead of URI. The callback query holds
//! the authorization code and `/api/photos` carries page tokens, neither of
//! which belongs in a log file. Sign-in attempts additionally record how the
//! callback ended.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::LOCATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::session::session_token;
use crate::state::AppState;

/// Route a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Home,
    Health,
    Login,
    Callback,
    Refresh,
    Logout,
    Photos,
    Other,
}

impl RouteName {
    pub fn of(path: &str) -> Self {
        match path {
            "/" => RouteName::Home,
            "/health" => RouteName::Health,
            "/api/auth/login" => RouteName::Login,
            "/api/auth/callback" => RouteName::Callback,
            "/api/auth/refresh" => RouteName::Refresh,
            "/api/auth/logout" => RouteName::Logout,
            "/api/photos" => RouteName::Photos,
            _ => RouteName::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::Health => "health",
            RouteName::Login => "auth.login",
            RouteName::Callback => "auth.callback",
            RouteName::Refresh => "auth.refresh",
            RouteName::Logout => "auth.logout",
            RouteName::Photos => "photos",
            RouteName::Other => "other",
        }
    }
}

/// How a callback response ended: `signed_in`, or the error code it
/// redirected with.
pub fn sign_in_outcome(response: &Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    match location.strip_prefix("/?error=") {
        Some(code) => Some(code.split('&').next().unwrap_or_default().to_string()),
        None if location == "/" => Some("signed_in".to_string()),
        None => None,
    }
}

pub async fn request_logging_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.request_logging {
        return next.run(request).await;
    }

    let route = RouteName::of(request.uri().path());
    let method = request.method().clone();
    let has_session = session_token(&CookieJar::from_headers(request.headers())).is_some();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    let outcome = match route {
        RouteName::Callback => sign_in_outcome(&response),
        _ => None,
    };

    if status.is_server_error() {
        tracing::error!(
            route = route.as_str(),
            %method,
            status = status.as_u16(),
            elapsed_ms,
            has_session,
            "Request failed"
        );
    } else if let Some(outcome) = outcome {
        tracing::info!(
            route = route.as_str(),
            status = status.as_u16(),
            elapsed_ms,
            outcome = %outcome,
            "Sign-in finished"
        );
    } else if route == RouteName::Health {
        tracing::debug!(status = status.as_u16(), elapsed_ms, "Health check");
    } else if status.is_client_error() {
        tracing::warn!(
            route = route.as_str(),
            %method,
            status = status.as_u16(),
            elapsed_ms,
            has_session,
            "Request rejected"
        );
    } else {
        tracing::info!(
            route = route.as_str(),
            %method,
            status = status.as_u16(),
            elapsed_ms,
            has_session,
            "Request served"
        );
    }

    response
}

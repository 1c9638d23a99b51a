//! OAuth sign-in, callback, refresh and logout.

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::error::{AuthFlowError, Result, ServerError};
use crate::session::{clear_session_cookies, refresh_token, set_session_cookies};
use crate::state::AppState;

/// Query parameters the provider sends to the callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// `{ "success": true }`
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// `GET /api/auth/login`: send the browser to the provider consent screen.
pub async fn login_handler(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.authorization_url)
}

/// `GET /api/auth/callback`: exchange the code and start the session.
///
/// A provider `error` wins over any `code`; an empty code counts as missing.
pub async fn callback_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> std::result::Result<(CookieJar, Redirect), AuthFlowError> {
    if let Some(error) = params.error.filter(|e| !e.is_empty()) {
        return Err(AuthFlowError::Provider(error));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(AuthFlowError::MissingCode)?;

    tracing::info!("Exchanging code for tokens");
    let tokens = state.oauth.exchange_code(&code).await?;

    tracing::info!(
        expires_at = ?tokens.expires_at(),
        has_refresh_token = tokens.refresh_token.is_some(),
        "Session established"
    );
    let jar = set_session_cookies(jar, &tokens, state.cookie_policy());
    Ok((jar, Redirect::temporary("/")))
}

/// `POST /api/auth/refresh`: trade the refresh cookie for a new access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let refresh = refresh_token(&jar).ok_or(ServerError::Unauthenticated)?;

    let tokens = state
        .oauth
        .refresh(&refresh)
        .await
        .map_err(ServerError::RefreshFailed)?;

    let jar = set_session_cookies(jar, &tokens, state.cookie_policy());
    Ok((jar, SuccessResponse::ok()))
}

/// `POST /api/auth/logout`: drop every session cookie.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    tracing::info!("Clearing session");
    (clear_session_cookies(jar), SuccessResponse::ok())
}

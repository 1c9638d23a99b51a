//! Session cookies.
//!
//! The session is nothing but cookies: the access token, the refresh token
//! and the (unused by this server, but cleared on logout) `user_info` cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use photoreel_oauth::AuthTokens;

/// Cookie holding the provider access token.
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Cookie holding the provider refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Cookie holding display info about the signed-in user.
pub const USER_INFO_COOKIE: &str = "user_info";

/// Every cookie that belongs to a session.
pub const SESSION_COOKIES: [&str; 3] = [AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_INFO_COOKIE];

/// Lifetime of the refresh token cookie (30 days).
pub const REFRESH_TOKEN_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Flags applied to every session cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Add the `Secure` attribute (production).
    pub secure: bool,
}

impl CookiePolicy {
    fn build(&self, name: &'static str, value: String, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(max_age_secs))
            .build()
    }
}

/// Attach session cookies for freshly issued tokens.
///
/// `auth_token` lives for `expires_in` seconds; `refresh_token` is only set
/// when the provider sent one and lives for 30 days.
pub fn set_session_cookies(jar: CookieJar, tokens: &AuthTokens, policy: CookiePolicy) -> CookieJar {
    let max_age = i64::try_from(tokens.expires_in).unwrap_or(i64::MAX);
    let mut jar = jar.add(policy.build(
        AUTH_TOKEN_COOKIE,
        tokens.access_token.clone(),
        max_age,
    ));

    if let Some(refresh) = tokens.refresh_token.as_ref().filter(|t| !t.is_empty()) {
        jar = jar.add(policy.build(
            REFRESH_TOKEN_COOKIE,
            refresh.clone(),
            REFRESH_TOKEN_MAX_AGE_SECS,
        ));
    }

    jar
}

/// Emit removal cookies for every session cookie.
///
/// Removals are sent whether or not the request carried the cookie.
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    SESSION_COOKIES.iter().fold(jar, |jar, name| {
        let mut cookie = Cookie::build((*name, "")).path("/").build();
        cookie.make_removal();
        jar.add(cookie)
    })
}

/// Access token from the request, if any. An empty value counts as absent.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    cookie_value(jar, AUTH_TOKEN_COOKIE)
}

/// Refresh token from the request, if any.
pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    cookie_value(jar, REFRESH_TOKEN_COOKIE)
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

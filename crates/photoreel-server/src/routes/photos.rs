//! Photo query proxy.

use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::cookie::CookieJar;
use photoreel_photos::MediaItemsPage;
use serde::Deserialize;

use crate::error::{Result, ServerError};
use crate::session::session_token;
use crate::state::AppState;

/// Query parameters for `GET /api/photos`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosQuery {
    /// Continuation token from a previous page.
    pub page_token: Option<String>,
}

/// `GET /api/photos`: the user's most recent photos.
///
/// Without a session cookie the provider is never contacted.
pub async fn photos_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PhotosQuery>,
) -> Result<Json<MediaItemsPage>> {
    let token = session_token(&jar).ok_or(ServerError::Unauthenticated)?;
    let page_token = query.page_token.as_deref().filter(|t| !t.is_empty());

    let page = state
        .photos
        .search_recent(&token, state.config.page_size, page_token)
        .await?;

    tracing::debug!(
        count = page.media_items.len(),
        has_more = page.next_page_token.is_some(),
        "Fetched photos"
    );

    Ok(Json(page))
}

//! Wire types of the Photos Library API.
//!
//! Field names follow the provider's camelCase JSON so pages can be relayed
//! to clients unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::variants::PhotoSize;

// ─────────────────────────────────────────────────────────────────────────────
// Media items
// ─────────────────────────────────────────────────────────────────────────────

/// A single photo or video in the user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Provider identifier, stable across sessions.
    pub id: String,
    /// User-supplied description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to the item in the provider's web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// Signed base URL; valid for roughly an hour and never persisted.
    pub base_url: String,
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Creation time, dimensions and camera details.
    #[serde(default)]
    pub media_metadata: MediaMetadata,
    /// Present for items shared into the library by someone else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor_info: Option<ContributorInfo>,
    /// Original filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl MediaItem {
    /// Display title: the filename, or "Untitled".
    pub fn title(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Untitled",
        }
    }

    /// URL of this item at the given size.
    pub fn variant_url(&self, size: PhotoSize) -> String {
        size.url(&self.base_url)
    }

    /// Parsed creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.media_metadata.creation_time.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Metadata attached to every media item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    /// Width in pixels, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Height in pixels, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Camera details (photos only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoMetadata>,
}

impl MediaMetadata {
    /// Dimensions in pixels, when both are present and numeric.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let width = self.width.as_deref()?.parse().ok()?;
        let height = self.height.as_deref()?.parse().ok()?;
        Some((width, height))
    }
}

/// Camera metadata of a photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture_f_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_equivalent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<String>,
}

impl PhotoMetadata {
    /// One-line camera summary, e.g. `Pixel 7 · f/1.9 · 1/120s · ISO 50`.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();

        match (self.camera_make.as_deref(), self.camera_model.as_deref()) {
            (Some(make), Some(model)) if model.starts_with(make) => parts.push(model.to_string()),
            (Some(make), Some(model)) => parts.push(format!("{} {}", make, model)),
            (Some(make), None) => parts.push(make.to_string()),
            (None, Some(model)) => parts.push(model.to_string()),
            (None, None) => {}
        }
        if let Some(f) = self.aperture_f_number {
            parts.push(format!("f/{}", f));
        }
        if let Some(ref exposure) = self.exposure_time {
            parts.push(exposure.clone());
        }
        if let Some(iso) = self.iso_equivalent {
            parts.push(format!("ISO {}", iso));
        }
        if let Some(mm) = self.focal_length {
            parts.push(format!("{}mm", mm));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }
}

/// Who contributed a shared item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorInfo {
    pub profile_picture_base_url: String,
    pub display_name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pages and requests
// ─────────────────────────────────────────────────────────────────────────────

/// One page of media items.
///
/// The provider omits `mediaItems` entirely for an empty library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemsPage {
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Media types the search endpoint can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    AllMedia,
    Photo,
    Video,
}

/// Body of `POST /mediaItems:search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Search restricted to photos.
    pub fn photos(page_size: u32, page_token: Option<String>) -> Self {
        Self {
            page_size,
            page_token,
            filters: SearchFilters {
                media_type_filter: MediaTypeFilter {
                    media_types: vec![MediaType::Photo],
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub media_type_filter: MediaTypeFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeFilter {
    pub media_types: Vec<MediaType>,
}

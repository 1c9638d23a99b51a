//! Resolution variants of provider-signed base URLs.

/// Append sizing parameters to a media item's base URL.
///
/// The provider serves any size from the same base URL when suffixed
/// with `=w{width}-h{height}`.
pub fn photo_url(base_url: &str, width: u32, height: u32) -> String {
    format!("{}=w{}-h{}", base_url, width, height)
}

/// Named sizes used by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSize {
    /// Main slide.
    Large,
    /// Default size when no variant is requested.
    Standard,
    /// Thumbnail strip.
    Thumbnail,
}

impl PhotoSize {
    /// Pixel bounds for this size.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PhotoSize::Large => (1200, 800),
            PhotoSize::Standard => (800, 600),
            PhotoSize::Thumbnail => (100, 100),
        }
    }

    /// Variant URL of `base_url` at this size.
    pub fn url(self, base_url: &str) -> String {
        let (width, height) = self.dimensions();
        photo_url(base_url, width, height)
    }
}

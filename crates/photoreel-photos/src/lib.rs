//! Typed client for the Google Photos Library API.
//!
//! # Example
//!
//! ```no_run
//! use photoreel_photos::{PhotosClient, PhotoSize, Result};
//!
//! # async fn example(access_token: &str) -> Result<()> {
//! let client = PhotosClient::builder().build()?;
//!
//! let page = client.search_recent(access_token, 50, None).await?;
//! for item in &page.media_items {
//!     println!("{} -> {}", item.id, item.variant_url(PhotoSize::Thumbnail));
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;
pub mod variants;

pub use client::{ClientBuilder, DEFAULT_API_BASE, PhotosClient};
pub use error::{PhotosError, Result};
pub use types::*;
pub use variants::{PhotoSize, photo_url};

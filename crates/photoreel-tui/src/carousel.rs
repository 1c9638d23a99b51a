//! Carousel controller.
//!
//! Holds the loaded media items and a cursor into them. Navigation wraps in
//! both directions; every operation is a no-op on an empty carousel.

use photoreel_photos::{MediaItem, PhotoSize};
use thiserror::Error;

/// Errors from carousel navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// `jump_to` past the end of the list.
    #[error("index {index} out of range for {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// Navigation requests, as produced by key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselAction {
    Next,
    Previous,
    First,
    Last,
    JumpTo(usize),
}

/// Cursor over an ordered list of media items.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    items: Vec<MediaItem>,
    index: usize,
}

impl Carousel {
    /// Create a carousel positioned at the first item.
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items, index: 0 }
    }

    /// Replace the items and move back to the first one.
    pub fn load(&mut self, items: Vec<MediaItem>) {
        self.items = items;
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current position, or `None` when empty.
    pub fn index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    /// Item under the cursor.
    pub fn current(&self) -> Option<&MediaItem> {
        self.items.get(self.index)
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Advance one item, wrapping from the last to the first.
    pub fn next(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Step back one item, wrapping from the first to the last.
    pub fn previous(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    /// Move to `index`. Out-of-range requests leave the cursor where it is.
    pub fn jump_to(&mut self, index: usize) -> Result<(), CarouselError> {
        let len = self.items.len();
        if len == 0 {
            return Ok(());
        }
        if index >= len {
            return Err(CarouselError::OutOfRange { index, len });
        }
        self.index = index;
        Ok(())
    }

    /// Apply a navigation action.
    pub fn apply(&mut self, action: CarouselAction) -> Result<(), CarouselError> {
        match action {
            CarouselAction::Next => self.next(),
            CarouselAction::Previous => self.previous(),
            CarouselAction::First => return self.jump_to(0),
            CarouselAction::Last => return self.jump_to(self.items.len().saturating_sub(1)),
            CarouselAction::JumpTo(index) => return self.jump_to(index),
        }
        Ok(())
    }

    /// Snapshot of what should be on screen.
    pub fn view(&self) -> CarouselView {
        let Some(item) = self.current() else {
            return CarouselView::Empty;
        };

        let thumbnails = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| ThumbnailView {
                id: item.id.clone(),
                url: item.variant_url(PhotoSize::Thumbnail),
                selected: i == self.index,
            })
            .collect();

        CarouselView::Showing {
            current: SlideView::from_item(item),
            position: (self.index + 1, self.items.len()),
            thumbnails,
        }
    }
}

/// What the carousel screen renders.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselView {
    /// No items loaded.
    Empty,
    /// An item is selected.
    Showing {
        current: SlideView,
        /// One-based position and total, e.g. `(3, 50)`.
        position: (usize, usize),
        thumbnails: Vec<ThumbnailView>,
    },
}

/// The selected item, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub id: String,
    pub title: String,
    /// Creation date, e.g. `May 1, 2024`.
    pub taken_on: Option<String>,
    pub description: Option<String>,
    /// Camera, exposure and lens summary.
    pub camera: Option<String>,
    pub dimensions: Option<(u32, u32)>,
    /// Large variant URL.
    pub image_url: String,
    pub product_url: Option<String>,
}

impl SlideView {
    fn from_item(item: &MediaItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title().to_string(),
            taken_on: item.created_at().map(|t| t.format("%b %-d, %Y").to_string()),
            description: item.description.clone().filter(|d| !d.is_empty()),
            camera: item
                .media_metadata
                .photo
                .as_ref()
                .and_then(|p| p.summary()),
            dimensions: item.media_metadata.dimensions(),
            image_url: item.variant_url(PhotoSize::Large),
            product_url: item.product_url.clone(),
        }
    }
}

/// One entry in the thumbnail strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView {
    pub id: String,
    /// Thumbnail variant URL.
    pub url: String,
    pub selected: bool,
}

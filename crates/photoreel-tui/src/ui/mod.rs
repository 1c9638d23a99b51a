//! UI rendering components.

pub mod carousel;
mod layout;
pub mod logs;

pub use carousel::{THUMB_WIDTH, slide_columns, thumbnail_cells};
pub use layout::{Regions, regions, render};

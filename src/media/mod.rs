//! Media module for item representation and extraction.

pub mod item;
pub mod parser;

pub use item::{HasItemId, ItemId, MediaItem};
pub use parser::{extension_from_content_type, extract_media_items};

//! API response type definitions.

use serde::{Deserialize, Serialize};

use crate::media::item::{HasItemId, ItemId};

/// One page of the posts feed.
#[derive(Debug, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Cursor for the next page. Empty or absent on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
}

/// A post from the feed.
///
/// Fields are optional here so a single odd post doesn't reject the whole
/// page; the extractor decides which ones are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub child: Option<Person>,
    #[serde(default)]
    pub author: Option<Person>,
    #[serde(default)]
    pub media: Option<Vec<PostMedia>>,
}

/// A child or staff member referenced by a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub forename: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

/// Media reference attached to a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMedia {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// A gallery entry. Every field other than `id` (including `updated`) is
/// carried through to the snapshot as-is and only read back by backfill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HasItemId for GalleryItem {
    fn item_id(&self) -> &ItemId {
        &self.id
    }
}

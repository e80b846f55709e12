//! Media item representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a media or gallery record.
///
/// The API sends numeric ids, but snapshots written by hand or by older
/// versions may carry strings. The original JSON type is preserved on output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

impl ItemId {
    /// True for ids that cannot name a file (empty strings).
    pub fn is_blank(&self) -> bool {
        match self {
            ItemId::Number(_) => false,
            ItemId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// Anything the downloader can fetch by id.
pub trait HasItemId {
    fn item_id(&self) -> &ItemId;
}

/// A downloadable media item extracted from a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Media ID, also the stem of the local file.
    pub id: ItemId,

    /// Full name of the child the post is about.
    pub child: String,

    /// Last-updated timestamp of the media, as sent by the API.
    pub timestamp: String,

    /// Full name of the post author.
    pub author: String,
}

impl HasItemId for MediaItem {
    fn item_id(&self) -> &ItemId {
        &self.id
    }
}

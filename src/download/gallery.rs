//! Gallery fetching and dedup against the output directory.

use std::path::Path;

use crate::api::{GalleryItem, ParentzoneApi};
use crate::error::Result;
use crate::fs::has_local_file;

/// Fetch the whole gallery.
pub async fn fetch_gallery(api: &ParentzoneApi) -> Result<Vec<GalleryItem>> {
    let items = api.get_gallery().await?;
    tracing::debug!("Gallery returned {} items", items.len());
    Ok(items)
}

/// Gallery items with no local `{id}.*` file, in their original order.
pub fn new_gallery_items(items: &[GalleryItem], dir: &Path) -> Result<Vec<GalleryItem>> {
    let mut fresh = Vec::new();
    for item in items {
        if !has_local_file(dir, &item.id)? {
            fresh.push(item.clone());
        }
    }
    Ok(fresh)
}

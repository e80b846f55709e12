//! Media extraction from posts.

use crate::api::types::{Person, Post};
use crate::error::{Error, Result};
use crate::media::item::MediaItem;

/// Flatten the media attached to `posts` into [`MediaItem`]s.
///
/// Order follows the posts, then the media within each post. Posts without
/// media are ignored; a post that has media but lacks a name or a media
/// field is an error.
pub fn extract_media_items(posts: &[Post]) -> Result<Vec<MediaItem>> {
    let mut items = Vec::new();

    for post in posts {
        let media = match post.media.as_deref() {
            Some(media) if !media.is_empty() => media,
            _ => continue,
        };

        let child = full_name(post, post.child.as_ref(), "child")?;
        let author = full_name(post, post.author.as_ref(), "author")?;

        for entry in media {
            let id = entry
                .id
                .clone()
                .ok_or_else(|| malformed(post, "media.id"))?;
            let timestamp = entry
                .updated
                .clone()
                .ok_or_else(|| malformed(post, "media.updated"))?;

            items.push(MediaItem {
                id,
                child: child.clone(),
                timestamp,
                author: author.clone(),
            });
        }
    }

    Ok(items)
}

/// Join forename and surname with a single space.
fn full_name(post: &Post, person: Option<&Person>, field: &str) -> Result<String> {
    let person = person.ok_or_else(|| malformed(post, field))?;
    let forename = person
        .forename
        .as_deref()
        .ok_or_else(|| malformed(post, &format!("{}.forename", field)))?;
    let surname = person
        .surname
        .as_deref()
        .ok_or_else(|| malformed(post, &format!("{}.surname", field)))?;

    Ok(format!("{} {}", forename, surname))
}

fn malformed(post: &Post, field: &str) -> Error {
    Error::MalformedPost {
        post: post
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<unknown>".to_string()),
        field: field.to_string(),
    }
}

/// File extension for a response `Content-Type`: its subtype.
///
/// Parameters such as `; charset=...` are dropped. Returns `None` when there
/// is no subtype or it contains characters unfit for a file name.
pub fn extension_from_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();
    let (_, subtype) = essence.split_once('/')?;
    let subtype = subtype.trim().to_lowercase();

    if !subtype.is_empty()
        && subtype.len() <= 32
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !subtype.starts_with('.')
    {
        Some(subtype)
    } else {
        None
    }
}

//! Filename generation and validation.

use crate::error::{Error, Result};
use crate::media::ItemId;

/// Validate a filename, rejecting anything that could escape its directory.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(Error::InvalidFilename(format!(
            "Control characters not allowed in filename: '{}'",
            name.escape_debug()
        )));
    }

    if name.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// File stem for an item id. Ids name files directly, so they must be safe.
pub fn id_stem(id: &ItemId) -> Result<String> {
    let stem = sanitize_filename(&id.to_string())?;
    if stem.starts_with('.') {
        return Err(Error::InvalidFilename(format!(
            "Media id cannot start with a dot: '{}'",
            stem
        )));
    }
    Ok(stem)
}

/// Final file name of a downloaded item: `{id}.{ext}`.
pub fn media_filename(id: &ItemId, extension: &str) -> Result<String> {
    let stem = id_stem(id)?;
    sanitize_filename(&format!("{}.{}", stem, extension))
}

/// Hidden name an item is written to before being renamed into place.
///
/// It must never match the `{id}.*` presence check.
pub fn partial_filename(id: &ItemId) -> Result<String> {
    Ok(format!(".{}.part", id_stem(id)?))
}

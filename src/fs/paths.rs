//! Directory management and local presence checks.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::id_stem;
use crate::media::ItemId;

/// Find a file named `{id}.*` in `dir`.
///
/// This is the only "already downloaded" signal; the file's content is never
/// inspected. A missing directory simply has no files.
pub fn find_existing_file(dir: &Path, id: &ItemId) -> Result<Option<PathBuf>> {
    let stem = id_stem(id)?;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if name
            .strip_prefix(stem.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
        {
            return Ok(Some(entry.path()));
        }
    }

    Ok(None)
}

/// Whether any `{id}.*` file exists in `dir`.
pub fn has_local_file(dir: &Path, id: &ItemId) -> Result<bool> {
    Ok(find_existing_file(dir, id)?.is_some())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Ensure the parent directory of a file exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

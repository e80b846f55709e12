//! JSON metadata snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::fs::ensure_parent_dir;
use crate::logging::ARCHIVE_TARGET;

/// Write `records` to `path` as an indented JSON array.
///
/// Any existing snapshot is replaced; nothing is merged.
pub fn save_snapshot<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;

    tracing::info!(target: ARCHIVE_TARGET, "Metadata saved to: {}", path.display());
    Ok(())
}

/// Read a snapshot back as loose JSON records.
pub fn load_snapshot(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&content)?;
    Ok(records)
}

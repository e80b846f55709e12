//! Restore file modification times from snapshot timestamps.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::error::Result;
use crate::metadata::snapshot::load_snapshot;

/// Extensions checked for each record, in order. Only the first match is used.
///
/// Items saved under any other extension are not backfilled.
pub const BACKFILL_EXTENSIONS: [&str; 2] = ["jpeg", "mp4"];

/// Outcome of one backfill pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackfillReport {
    pub updated: u64,
    pub not_found: u64,
    pub skipped_no_id: u64,
    pub invalid_timestamps: u64,
    pub failed: u64,
}

/// Set access and modification times of files in `media_dir` from the
/// `timestamp_field` of each record in the snapshot at `snapshot`.
pub fn backfill_timestamps(
    snapshot: &Path,
    media_dir: &Path,
    timestamp_field: &str,
) -> Result<BackfillReport> {
    tracing::info!(
        "Processing metadata file: {} with timestamp key: {}",
        snapshot.display(),
        timestamp_field
    );

    let records = load_snapshot(snapshot)?;
    let mut report = BackfillReport::default();

    for record in &records {
        let Some(id) = record_id(record) else {
            tracing::debug!("Skipping item with missing 'id'");
            report.skipped_no_id += 1;
            continue;
        };

        let path = match find_media_file(media_dir, &id) {
            Ok(Some(path)) => path,
            Ok(None) => {
                report.not_found += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!("Cannot inspect media for item {}: {}", id, e);
                report.failed += 1;
                continue;
            }
        };

        let Some(raw) = record
            .get(timestamp_field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        else {
            continue;
        };

        match parse_timestamp(raw) {
            Some(secs) => match set_file_times(&path, secs) {
                Ok(()) => {
                    tracing::debug!("Updated timestamp for {} to {}", path.display(), secs);
                    report.updated += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to set times on {}: {}", path.display(), e);
                    report.failed += 1;
                }
            },
            None => {
                tracing::warn!("Invalid timestamp '{}' for {}", raw, path.display());
                report.invalid_timestamps += 1;
            }
        }
    }

    Ok(report)
}

/// First of `{id}.jpeg`, `{id}.mp4` that exists as a regular file.
fn find_media_file(media_dir: &Path, id: &str) -> io::Result<Option<PathBuf>> {
    for ext in BACKFILL_EXTENSIONS {
        let path = media_dir.join(format!("{}.{}", id, ext));
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => return Ok(Some(path)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        tracing::debug!("File not found: {}", path.display());
    }
    Ok(None)
}

/// Record id as a file stem. Missing, null, blank and path-like ids are skipped.
fn record_id(record: &Value) -> Option<String> {
    let id = match record.get("id")? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return None;
    }
    Some(id)
}

/// Parse an ISO-8601 timestamp into whole epoch seconds.
///
/// Offset-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc().timestamp())
}

/// Set both access and modification time of `path` to `secs` since the epoch.
///
/// Only ownership is required, not write permission.
pub fn set_file_times(path: &Path, secs: i64) -> io::Result<()> {
    let time = if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs.unsigned_abs())
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    };

    let file = File::open(path)?;
    file.set_times(FileTimes::new().set_accessed(time).set_modified(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::snapshot::save_snapshot;
    use serde_json::json;

    fn modified_secs(path: &Path) -> i64 {
        let modified = fs::metadata(path).unwrap().modified().unwrap();
        modified.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
    }

    fn write_snapshot(dir: &Path, records: Vec<Value>) -> std::path::PathBuf {
        let path = dir.join("metadata.json");
        save_snapshot(&records, &path).unwrap();
        path
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2023-01-01T00:00:00Z"), Some(1_672_531_200));
        assert_eq!(parse_timestamp("2023-01-01T01:00:00+01:00"), Some(1_672_531_200));
        assert_eq!(parse_timestamp("2023-01-01T00:00:00.750Z"), Some(1_672_531_200));
        assert_eq!(parse_timestamp("2023-01-01T00:00:00"), Some(1_672_531_200));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_jpeg_gets_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("42.jpeg");
        fs::write(&file, b"jpeg").unwrap();
        let snapshot = write_snapshot(
            dir.path(),
            vec![json!({"id": "42", "timestamp": "2023-01-01T00:00:00Z"})],
        );

        let report = backfill_timestamps(&snapshot, dir.path(), "timestamp").unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(modified_secs(&file), 1_672_531_200);
    }

    #[test]
    fn test_png_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("42.png");
        fs::write(&file, b"png").unwrap();
        let before = modified_secs(&file);
        let snapshot = write_snapshot(
            dir.path(),
            vec![json!({"id": "42", "timestamp": "2023-01-01T00:00:00Z"})],
        );

        let report = backfill_timestamps(&snapshot, dir.path(), "timestamp").unwrap();

        assert_eq!(report.updated, 0);
        assert_eq!(report.not_found, 1);
        assert_eq!(modified_secs(&file), before);
    }

    #[test]
    fn test_jpeg_preferred_over_mp4() {
        let dir = tempfile::tempdir().unwrap();
        let jpeg = dir.path().join("7.jpeg");
        let mp4 = dir.path().join("7.mp4");
        fs::write(&jpeg, b"a").unwrap();
        fs::write(&mp4, b"b").unwrap();
        let mp4_before = modified_secs(&mp4);
        let snapshot = write_snapshot(
            dir.path(),
            vec![json!({"id": 7, "updated": "2020-06-01T12:00:00Z"})],
        );

        backfill_timestamps(&snapshot, dir.path(), "updated").unwrap();

        assert_eq!(modified_secs(&jpeg), 1_591_012_800);
        assert_eq!(modified_secs(&mp4), mp4_before);
    }

    #[test]
    fn test_mp4_used_when_no_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let mp4 = dir.path().join("8.mp4");
        fs::write(&mp4, b"b").unwrap();
        let snapshot = write_snapshot(
            dir.path(),
            vec![json!({"id": 8, "updated": "2020-06-01T12:00:00Z"})],
        );

        let report = backfill_timestamps(&snapshot, dir.path(), "updated").unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(modified_secs(&mp4), 1_591_012_800);
    }

    #[test]
    fn test_skips_and_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.jpeg"), b"a").unwrap();
        fs::write(dir.path().join("2.jpeg"), b"a").unwrap();
        let snapshot = write_snapshot(
            dir.path(),
            vec![
                json!({"timestamp": "2023-01-01T00:00:00Z"}),
                json!({"id": "", "timestamp": "2023-01-01T00:00:00Z"}),
                json!({"id": 1, "timestamp": "not a date"}),
                json!({"id": 2}),
            ],
        );

        let report = backfill_timestamps(&snapshot, dir.path(), "timestamp").unwrap();

        assert_eq!(
            report,
            BackfillReport {
                updated: 0,
                not_found: 0,
                skipped_no_id: 2,
                invalid_timestamps: 1,
                failed: 0,
            }
        );
    }

    #[test]
    fn test_missing_snapshot_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(backfill_timestamps(&dir.path().join("nope.json"), dir.path(), "updated").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_file_gets_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("42.jpeg");
        fs::write(&file, b"jpeg").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms).unwrap();
        let snapshot = write_snapshot(
            dir.path(),
            vec![json!({"id": "42", "timestamp": "2023-01-01T00:00:00Z"})],
        );

        let report = backfill_timestamps(&snapshot, dir.path(), "timestamp").unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(modified_secs(&file), 1_672_531_200);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_is_counted_and_pass_continues() {
        let dir = tempfile::tempdir().unwrap();
        // Self-referencing link: stat fails with ELOOP
        let looped = dir.path().join("9.jpeg");
        std::os::unix::fs::symlink(&looped, &looped).unwrap();
        let file = dir.path().join("10.jpeg");
        fs::write(&file, b"jpeg").unwrap();
        let snapshot = write_snapshot(
            dir.path(),
            vec![
                json!({"id": 9, "timestamp": "2023-01-01T00:00:00Z"}),
                json!({"id": 10, "timestamp": "2023-01-01T00:00:00Z"}),
            ],
        );

        let report = backfill_timestamps(&snapshot, dir.path(), "timestamp").unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(modified_secs(&file), 1_672_531_200);
    }
}

//! Sync mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which stages of the archive run to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Posts, gallery, then timestamp backfill for both (default).
    #[default]
    Full,
    /// Only posts media and the posts snapshot.
    Posts,
    /// Only gallery media and the gallery snapshot.
    Gallery,
    /// Only re-apply timestamps from existing snapshots. No network access.
    Timestamps,
}

impl SyncMode {
    /// Whether this mode touches the posts endpoint.
    pub fn includes_posts(&self) -> bool {
        matches!(self, SyncMode::Full | SyncMode::Posts)
    }

    /// Whether this mode touches the gallery endpoint.
    pub fn includes_gallery(&self) -> bool {
        matches!(self, SyncMode::Full | SyncMode::Gallery)
    }

    /// Whether this mode needs an API key at all.
    pub fn needs_api(&self) -> bool {
        !matches!(self, SyncMode::Timestamps)
    }

    /// Snapshots whose timestamps are backfilled, in order.
    pub fn snapshot_kinds(&self) -> &'static [SnapshotKind] {
        match self {
            SyncMode::Full | SyncMode::Timestamps => &[SnapshotKind::Posts, SnapshotKind::Gallery],
            SyncMode::Posts => &[SnapshotKind::Posts],
            SyncMode::Gallery => &[SnapshotKind::Gallery],
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Full => write!(f, "full"),
            SyncMode::Posts => write!(f, "posts"),
            SyncMode::Gallery => write!(f, "gallery"),
            SyncMode::Timestamps => write!(f, "timestamps"),
        }
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(SyncMode::Full),
            "posts" => Ok(SyncMode::Posts),
            "gallery" => Ok(SyncMode::Gallery),
            "timestamps" => Ok(SyncMode::Timestamps),
            _ => Err(format!("Unknown sync mode: {}", s)),
        }
    }
}

/// Which snapshot a backfill pass reads, and the timestamp field it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Posts,
    Gallery,
}

impl SnapshotKind {
    /// Record field holding the timestamp for this snapshot.
    pub fn timestamp_field(&self) -> &'static str {
        match self {
            SnapshotKind::Posts => "timestamp",
            SnapshotKind::Gallery => "updated",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKind::Posts => write!(f, "posts"),
            SnapshotKind::Gallery => write!(f, "gallery"),
        }
    }
}

//! Download outcomes and run statistics.

use std::path::PathBuf;

use crate::media::ItemId;
use crate::metadata::BackfillReport;

/// What happened to a single item in the downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Newly written to this path.
    Downloaded(PathBuf),
    /// A `{id}.*` file was already there; nothing was requested.
    AlreadyPresent(PathBuf),
    /// The request or the write failed.
    Failed(String),
}

/// Result of one downloader pass.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub downloaded: Vec<PathBuf>,
    pub already_present: u64,
    pub failed: Vec<(ItemId, String)>,
}

impl DownloadReport {
    /// Fold one item's outcome into the report.
    pub fn record(&mut self, id: &ItemId, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded(path) => self.downloaded.push(path),
            DownloadOutcome::AlreadyPresent(_) => self.already_present += 1,
            DownloadOutcome::Failed(reason) => self.failed.push((id.clone(), reason)),
        }
    }

    /// Number of network requests this pass made.
    pub fn attempted(&self) -> usize {
        self.downloaded.len() + self.failed.len()
    }
}

/// Statistics across the whole run.
#[derive(Debug, Default)]
pub struct SyncStats {
    pub posts_fetched: u64,
    pub post_media: u64,
    pub gallery_items: u64,
    pub gallery_new: u64,
    pub downloaded: u64,
    pub already_present: u64,
    pub failed: u64,
    pub timestamps_updated: u64,
    pub timestamps_failed: u64,
}

impl SyncStats {
    /// Add a downloader pass.
    pub fn add_downloads(&mut self, report: &DownloadReport) {
        self.downloaded += report.downloaded.len() as u64;
        self.already_present += report.already_present;
        self.failed += report.failed.len() as u64;
    }

    /// Add a backfill pass.
    pub fn add_backfill(&mut self, report: &BackfillReport) {
        self.timestamps_updated += report.updated;
        self.timestamps_failed += report.failed;
    }
}

//! Download module for the archive run.
//!
//! This module provides:
//! - Paged posts fetching
//! - Gallery fetching and dedup
//! - Incremental media downloading
//! - Run stages and statistics

pub mod gallery;
pub mod media;
pub mod posts;
pub mod state;
pub mod sync;

pub use gallery::{fetch_gallery, new_gallery_items};
pub use media::{download_item, download_items};
pub use posts::{fetch_all_posts, PostsFetch};
pub use state::{DownloadOutcome, DownloadReport, SyncStats};
pub use sync::{backfill_snapshot, sync_gallery, sync_posts};

//! Parentzone Archiver - keep a local copy of Parentzone photos and videos.
//!
//! This library pages through the posts feed and the gallery, downloads any
//! media not yet present in the output directory, writes JSON metadata
//! snapshots, and restores file times from the API timestamps.
//!
//! # Features
//!
//! - Cursor-paginated posts fetching with partial results on failure
//! - Incremental downloads keyed on `{id}.*` files in the output directory
//! - File extensions taken from the response `Content-Type`
//! - Pretty-printed metadata snapshots
//! - Modification time backfill from snapshot timestamps
//!
//! # Example
//!
//! ```no_run
//! use parentzone_archiver::{download, Config, ParentzoneApi, SyncStats};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let api = ParentzoneApi::new(&config.api.base_url, "my-api-key".to_string())?;
//!
//!     let mut stats = SyncStats::default();
//!     download::sync_posts(&api, &config, &mut stats).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod logging;
pub mod media;
pub mod metadata;
pub mod output;

// Re-exports for convenience
pub use api::ParentzoneApi;
pub use config::{Config, SnapshotKind, SyncMode};
pub use download::{
    backfill_snapshot, download_items, fetch_all_posts, sync_gallery, sync_posts, DownloadOutcome,
    DownloadReport, SyncStats,
};
pub use error::{Error, Result};
pub use media::{ItemId, MediaItem};
pub use metadata::{backfill_timestamps, save_snapshot, BackfillReport};

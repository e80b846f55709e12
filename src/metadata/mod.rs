//! Metadata module for snapshots and timestamp backfill.
//!
//! Provides:
//! - Writing and reading JSON snapshots of fetched records
//! - Restoring file times from snapshot timestamps

pub mod backfill;
pub mod snapshot;

pub use backfill::{backfill_timestamps, parse_timestamp, BackfillReport, BACKFILL_EXTENSIONS};
pub use snapshot::{load_snapshot, save_snapshot};

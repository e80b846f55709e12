//! Archive run stages: posts, gallery and timestamp backfill.

use tokio::time::sleep;

use crate::api::ParentzoneApi;
use crate::config::{Config, SnapshotKind};
use crate::download::gallery::{fetch_gallery, new_gallery_items};
use crate::download::media::download_items;
use crate::download::posts::fetch_all_posts;
use crate::download::state::SyncStats;
use crate::error::Result;
use crate::media::extract_media_items;
use crate::metadata::{backfill_timestamps, save_snapshot, BackfillReport};
use crate::output::{print_info, print_warning};

/// Fetch all posts, download their media and write the posts snapshot.
pub async fn sync_posts(
    api: &ParentzoneApi,
    config: &Config,
    stats: &mut SyncStats,
) -> Result<()> {
    let fetch = fetch_all_posts(api, config).await;

    if let Some(e) = &fetch.stopped_by {
        print_warning(&format!(
            "Stopped fetching posts after {} pages: {}",
            fetch.pages, e
        ));
    }
    stats.posts_fetched += fetch.posts.len() as u64;

    let media_items = extract_media_items(&fetch.posts)?;
    stats.post_media += media_items.len() as u64;
    print_info(&format!("Found {} media items.", media_items.len()));
    sleep(config.options.summary_pause()).await;

    let report = download_items(api, config, &media_items, &config.paths.output_dir).await?;
    stats.add_downloads(&report);

    save_snapshot(&media_items, config.snapshot_path(SnapshotKind::Posts))?;

    Ok(())
}

/// Fetch the gallery, write its snapshot and download anything new.
///
/// A failed gallery request is reported and treated as an empty gallery.
pub async fn sync_gallery(
    api: &ParentzoneApi,
    config: &Config,
    stats: &mut SyncStats,
) -> Result<()> {
    let gallery = match fetch_gallery(api).await {
        Ok(items) => items,
        Err(e) => {
            print_warning(&format!("Gallery fetch failed: {}", e));
            Vec::new()
        }
    };
    stats.gallery_items += gallery.len() as u64;

    save_snapshot(&gallery, config.snapshot_path(SnapshotKind::Gallery))?;

    let fresh = new_gallery_items(&gallery, &config.paths.output_dir)?;
    stats.gallery_new += fresh.len() as u64;
    print_info(&format!("Found {} new gallery items.", fresh.len()));
    sleep(config.options.summary_pause()).await;

    let report = download_items(api, config, &fresh, &config.paths.output_dir).await?;
    stats.add_downloads(&report);

    Ok(())
}

/// Apply the timestamps recorded in one snapshot to the output directory.
pub fn backfill_snapshot(
    config: &Config,
    kind: SnapshotKind,
    stats: &mut SyncStats,
) -> Result<BackfillReport> {
    let report = backfill_timestamps(
        config.snapshot_path(kind),
        &config.paths.output_dir,
        kind.timestamp_field(),
    )?;
    stats.add_backfill(&report);
    Ok(report)
}

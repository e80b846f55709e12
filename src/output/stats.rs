//! Statistics reporting.

use console::style;

use crate::download::SyncStats;
use crate::metadata::BackfillReport;

/// Print statistics for the whole run.
pub fn print_sync_stats(stats: &SyncStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Archive Statistics:").bold());
    println!("  Posts fetched:     {}", stats.posts_fetched);
    println!("  Post media:        {}", stats.post_media);
    println!("  Gallery items:     {} ({} new)", stats.gallery_items, stats.gallery_new);
    println!("  Downloaded:        {}", style(stats.downloaded).green());
    println!("  Already present:   {}", stats.already_present);
    if stats.failed > 0 {
        println!("  Failed:            {}", style(stats.failed).red());
    }
    println!("  Timestamps set:    {}", stats.timestamps_updated);
    if stats.timestamps_failed > 0 {
        println!("  Timestamps failed: {}", style(stats.timestamps_failed).red());
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Print the result of one backfill pass.
pub fn print_backfill_report(label: &str, report: &BackfillReport) {
    println!(
        "Timestamps ({}): {} updated, {} without jpeg/mp4 file, {} without id, {} invalid, {} failed",
        label,
        style(report.updated).green(),
        style(report.not_found).yellow(),
        report.skipped_no_id,
        style(report.invalid_timestamps).red(),
        style(report.failed).red()
    );
}

//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, SyncMode};

/// Parentzone media archiver CLI.
#[derive(Parser, Debug)]
#[command(
    name = "parentzone-archiver",
    version,
    about = "Archive photos and videos from a Parentzone account",
    long_about = "Downloads every photo and video referenced by your Parentzone posts and gallery.\n\n\
                  Files already in the output directory are skipped, JSON metadata snapshots are \
                  written alongside them, and file times are set from the API timestamps."
)]
pub struct Args {
    /// Parentzone API key.
    #[arg(long = "api-key", env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory for downloaded media (and default snapshot location).
    #[arg(short = 'd', long = "directory")]
    pub output_dir: Option<PathBuf>,

    /// Which stages to run.
    #[arg(long, value_enum)]
    pub mode: Option<SyncModeArg>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "parentzone.toml")]
    pub config: PathBuf,

    /// Don't clear the terminal between progress lines.
    #[arg(long)]
    pub no_clear: bool,

    /// Hide progress output and progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI sync mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SyncModeArg {
    /// Posts, gallery, then timestamps.
    Full,
    /// Only posts media.
    Posts,
    /// Only gallery media.
    Gallery,
    /// Only re-apply timestamps from existing snapshots.
    Timestamps,
}

impl From<SyncModeArg> for SyncMode {
    fn from(arg: SyncModeArg) -> Self {
        match arg {
            SyncModeArg::Full => SyncMode::Full,
            SyncModeArg::Posts => SyncMode::Posts,
            SyncModeArg::Gallery => SyncMode::Gallery,
            SyncModeArg::Timestamps => SyncMode::Timestamps,
        }
    }
}

impl Args {
    /// Console log level implied by the flags.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    ///
    /// The API key is not merged; it goes through credential resolution.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.relocate_output_dir(dir.clone());
        }

        if let Some(mode) = self.mode {
            config.options.mode = mode.into();
        }

        if self.no_clear {
            config.options.clear_console = false;
        }

        if self.quiet {
            config.options.clear_console = false;
            config.options.show_progress = false;
        }
    }
}

//! Configuration structures and loading logic.

use crate::api::API_BASE;
use crate::config::modes::{SnapshotKind, SyncMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Parentzone API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Post type filters sent as `typeIDs[]`.
    #[serde(default = "default_post_type_ids")]
    pub post_type_ids: Vec<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            post_type_ids: default_post_type_ids(),
        }
    }
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// API key, if stored in the config file rather than the key file.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding downloaded media.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Snapshot of media extracted from posts.
    #[serde(default = "default_posts_metadata")]
    pub posts_metadata: PathBuf,

    /// Snapshot of gallery items.
    #[serde(default = "default_gallery_metadata")]
    pub gallery_metadata: PathBuf,

    /// Directory for the download event log.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// File the API key is persisted to after being entered.
    #[serde(default = "default_api_key_file")]
    pub api_key_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            posts_metadata: default_posts_metadata(),
            gallery_metadata: default_gallery_metadata(),
            log_dir: default_log_dir(),
            api_key_file: default_api_key_file(),
        }
    }
}

/// Run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Which stages to run.
    #[serde(default)]
    pub mode: SyncMode,

    /// Pause after each fetched page of posts.
    #[serde(default = "default_request_delay")]
    pub page_delay_ms: u64,

    /// Pause after each attempted media download.
    #[serde(default = "default_request_delay")]
    pub download_delay_ms: u64,

    /// Pause after printing how many items were found.
    #[serde(default = "default_summary_pause")]
    pub summary_pause_ms: u64,

    /// Clear the terminal between progress lines.
    #[serde(default = "default_true")]
    pub clear_console: bool,

    /// Show progress bars for large downloads.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            mode: SyncMode::default(),
            page_delay_ms: default_request_delay(),
            download_delay_ms: default_request_delay(),
            summary_pause_ms: default_summary_pause(),
            clear_console: true,
            show_progress: true,
        }
    }
}

impl OptionsConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    pub fn summary_pause(&self) -> Duration {
        Duration::from_millis(self.summary_pause_ms)
    }
}

fn default_base_url() -> String {
    API_BASE.to_string()
}

fn default_post_type_ids() -> Vec<u32> {
    vec![14, 12]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./out")
}

fn default_posts_metadata() -> PathBuf {
    default_output_dir().join("posts_metadata.json")
}

fn default_gallery_metadata() -> PathBuf {
    default_output_dir().join("gallery_metadata.json")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./log")
}

fn default_api_key_file() -> PathBuf {
    PathBuf::from("./api_key.txt")
}

fn default_request_delay() -> u64 {
    500
}

fn default_summary_pause() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Snapshot path for the given kind.
    pub fn snapshot_path(&self, kind: SnapshotKind) -> &Path {
        match kind {
            SnapshotKind::Posts => &self.paths.posts_metadata,
            SnapshotKind::Gallery => &self.paths.gallery_metadata,
        }
    }

    /// Path of the download event log.
    pub fn log_file(&self) -> PathBuf {
        self.paths.log_dir.join("downloaded_files.log")
    }

    /// Move the output directory, carrying default-located snapshots with it.
    pub fn relocate_output_dir(&mut self, dir: PathBuf) {
        if self.paths.posts_metadata == self.paths.output_dir.join("posts_metadata.json") {
            self.paths.posts_metadata = dir.join("posts_metadata.json");
        }
        if self.paths.gallery_metadata == self.paths.output_dir.join("gallery_metadata.json") {
            self.paths.gallery_metadata = dir.join("gallery_metadata.json");
        }
        self.paths.output_dir = dir;
    }
}

//! Configuration module for the parentzone-archiver.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Sync mode selection
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, ApiConfig, Config, OptionsConfig, PathsConfig};
pub use modes::{SnapshotKind, SyncMode};
pub use validation::{validate_api_key, validate_base_url, validate_config};

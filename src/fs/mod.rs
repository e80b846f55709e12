//! Filesystem module.
//!
//! Provides:
//! - Directory management and presence checks
//! - Filename generation and validation

pub mod naming;
pub mod paths;

pub use naming::{id_stem, media_filename, partial_filename, sanitize_filename};
pub use paths::{ensure_dir, ensure_parent_dir, find_existing_file, has_local_file};

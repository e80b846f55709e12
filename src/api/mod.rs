//! Parentzone API module.
//!
//! This module provides:
//! - HTTP client for the Parentzone REST API
//! - API key resolution and persistence
//! - API response types

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{prompt_for_api_key, resolve_api_key};
pub use client::{ParentzoneApi, API_BASE};
pub use types::*;

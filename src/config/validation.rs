//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use url::Url;

/// Validate the entire configuration.
///
/// The API key is resolved separately and checked with [`validate_api_key`].
pub fn validate_config(config: &Config) -> Result<()> {
    validate_base_url(&config.api.base_url)?;
    validate_post_type_ids(&config.api.post_type_ids)?;

    let paths = [
        ("output_dir", &config.paths.output_dir),
        ("posts_metadata", &config.paths.posts_metadata),
        ("gallery_metadata", &config.paths.gallery_metadata),
        ("log_dir", &config.paths.log_dir),
        ("api_key_file", &config.paths.api_key_file),
    ];
    for (field, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                field: field.to_string(),
                message: "Path cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

/// Validate the API base URL.
pub fn validate_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.cannot_be_a_base() {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("'{}' cannot be used as a base URL", base_url),
        });
    }

    Ok(url)
}

/// Validate the post type filters.
pub fn validate_post_type_ids(ids: &[u32]) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::ConfigValidation {
            field: "post_type_ids".to_string(),
            message: "At least one post type ID is required".to_string(),
        });
    }

    Ok(())
}

/// Validate an API key before it is sent as a header.
pub fn validate_api_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::MissingApiKey);
    }

    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key cannot contain whitespace or control characters".to_string(),
        });
    }

    // Check for placeholder values
    let lower = key.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_api_key") {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key appears to be a placeholder. Please provide your actual key."
                .to_string(),
        });
    }

    Ok(())
}

//! API key resolution and persistence.

use std::fs;
use std::path::Path;

use console::Term;

use crate::error::{Error, Result};

/// Resolve the API key.
///
/// Sources are tried in order: `explicit` (CLI flag or `API_KEY`), the key
/// from the config file, the key file, and finally `prompt`. A key obtained
/// from the prompt is written to `key_file`. Blank values count as absent.
pub fn resolve_api_key<F>(
    explicit: Option<&str>,
    config_key: Option<&str>,
    key_file: &Path,
    prompt: F,
) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(key) = non_blank(explicit) {
        tracing::debug!("Using API key from command line or environment");
        return Ok(key);
    }

    if let Some(key) = non_blank(config_key) {
        tracing::debug!("Using API key from configuration file");
        return Ok(key);
    }

    if let Some(key) = read_key_file(key_file)? {
        tracing::debug!("Using API key from {}", key_file.display());
        return Ok(key);
    }

    let key = prompt()?.trim().to_string();
    if key.is_empty() {
        return Err(Error::MissingApiKey);
    }

    store_key_file(key_file, &key)?;
    tracing::info!("API key saved to {}", key_file.display());

    Ok(key)
}

/// Read a persisted key, returning `None` if the file is missing or blank.
pub fn read_key_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(non_blank(Some(&content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Persist a key, creating parent directories as needed.
pub fn store_key_file(path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, key)?;
    Ok(())
}

/// Ask for the key on the terminal.
pub fn prompt_for_api_key() -> Result<String> {
    let term = Term::stdout();
    term.write_str("Enter your API key: ")?;
    let line = term.read_line()?;
    Ok(line)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

//! # Env File Parser
//!
//! Line-oriented parsing of `KEY=VALUE` files. Blank lines and lines starting
//! with `#` or `;` are ignored, the first `=` splits key from value, and the
//! last occurrence wins on duplicate keys. No quoting, escaping, or multi-line
//! value support.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Read and parse an env file.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub async fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    debug!("Reading file {}", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read: {}", path.display()))?;
    Ok(parse_env_content(&content))
}

/// Parse `KEY=VALUE` lines from an in-memory buffer.
pub fn parse_env_content(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        // Parse KEY=VALUE format
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            let value = value.trim().to_string();
            entries.insert(key, value);
        }
    }

    entries
}

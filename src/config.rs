//! # Sync Configuration
//!
//! Explicit configuration for a sync run, populated once from the parsed env
//! file before the core runs. The env file is expected to carry `GH_ACCOUNT`,
//! `GH_REPO`, and `GH_TOKEN`; the process environment is consulted as a
//! fallback so CI can inject the token without writing it to disk.

use std::collections::BTreeMap;
use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set. Add it to your env file or the process environment.")]
    Missing(&'static str),
}

/// Target repository and credential for a sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// GitHub account or organization that owns the repository
    pub account: String,
    /// Repository name
    pub repo: String,
    /// Access token for the GitHub API
    pub token: String,
}

impl SyncConfig {
    /// Build a config from parsed env entries, falling back to the process
    /// environment for any key the file does not carry.
    ///
    /// # Errors
    /// Returns `ConfigError::Missing` naming the first absent key.
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        Ok(Self {
            account: lookup(entries, "GH_ACCOUNT")?,
            repo: lookup(entries, "GH_REPO")?,
            token: lookup(entries, "GH_TOKEN")?,
        })
    }
}

fn lookup(entries: &BTreeMap<String, String>, key: &'static str) -> Result<String, ConfigError> {
    if let Some(value) = entries.get(key) {
        if !value.is_empty() {
            return Ok(value.clone());
        }
    }
    std::env::var(key).map_err(|_| ConfigError::Missing(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_all_three_keys_from_entries() {
        let input = entries(&[
            ("GH_ACCOUNT", "octocat"),
            ("GH_REPO", "hello-world"),
            ("GH_TOKEN", "ghp_abc"),
        ]);
        let config = SyncConfig::from_entries(&input).expect("config");
        assert_eq!(config.account, "octocat");
        assert_eq!(config.repo, "hello-world");
        assert_eq!(config.token, "ghp_abc");
    }

    #[test]
    fn missing_key_names_the_key() {
        let input = entries(&[("GH_ACCOUNT", "octocat"), ("GH_REPO", "hello-world")]);
        // Guard against the fallback picking the token up from the test
        // runner's environment.
        if std::env::var("GH_TOKEN").is_ok() {
            return;
        }
        let err = SyncConfig::from_entries(&input).expect_err("should fail");
        assert!(err.to_string().contains("GH_TOKEN"));
    }
}

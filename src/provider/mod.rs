//! # Provider Module
//!
//! Boundary to the remote configuration store. The orchestrator and executor
//! only ever talk to the `ActionsProvider` trait; the GitHub implementation
//! lives in [`github`].

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

/// Remote store for a repository's Actions secrets and variables.
///
/// Every method is blocking network I/O from the caller's perspective and is
/// dispatched on its own task by the executor, so no single call stalls the
/// rest of a batch.
#[async_trait]
pub trait ActionsProvider: Send + Sync {
    /// List the names of all repository secrets. Values are never returned
    /// by the store.
    async fn list_secret_names(&self) -> Result<BTreeSet<String>>;

    /// Create or update a secret. The store has a single upsert verb for
    /// secrets, so create and update take the same call.
    async fn put_secret(&self, name: &str, value: &str) -> Result<()>;

    /// Delete a secret by name.
    async fn delete_secret(&self, name: &str) -> Result<()>;

    /// List all repository variables with their values.
    async fn list_variables(&self) -> Result<BTreeMap<String, String>>;

    /// Create a variable. Fails if the variable already exists; changing a
    /// value requires delete-then-create.
    async fn create_variable(&self, name: &str, value: &str) -> Result<()>;

    /// Delete a variable by name.
    async fn delete_variable(&self, name: &str) -> Result<()>;
}

pub mod github;

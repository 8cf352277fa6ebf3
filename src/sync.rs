//! # Sync Orchestrator
//!
//! Drives a full run: classify the parsed entries, then for each bucket fetch
//! the remote listing, plan, and apply. Secrets run first, then variables;
//! the two pipelines are independent and the order carries no meaning.

use crate::classifier;
use crate::executor;
use crate::provider::ActionsProvider;
use crate::reconciler::{self, OperationResult, RemoteState};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Aggregated per-key results of one sync run.
///
/// Serializes as `{"SECRETS": [...], "VARIABLES": [...]}` for verbose output.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    #[serde(rename = "SECRETS")]
    pub secrets: Vec<OperationResult>,
    #[serde(rename = "VARIABLES")]
    pub variables: Vec<OperationResult>,
}

impl SyncReport {
    /// Keys with a captured failure, across both buckets.
    pub fn failures(&self) -> Vec<&OperationResult> {
        self.secrets
            .iter()
            .chain(self.variables.iter())
            .filter(|r| !r.is_ok())
            .collect()
    }
}

/// Run one full sync of `entries` against the remote store.
///
/// # Errors
/// Returns an error only when a remote listing cannot be fetched; individual
/// mutation failures are captured per key in the report instead.
pub async fn run(
    provider: Arc<dyn ActionsProvider>,
    entries: &BTreeMap<String, String>,
    dry_run: bool,
) -> Result<SyncReport> {
    let classified = classifier::classify(entries);

    let secrets = sync_bucket(&provider, &classified.secrets, true, dry_run).await?;
    let variables = sync_bucket(&provider, &classified.variables, false, dry_run).await?;

    Ok(SyncReport { secrets, variables })
}

/// Fetch, plan, and apply one bucket.
async fn sync_bucket(
    provider: &Arc<dyn ActionsProvider>,
    bucket: &BTreeMap<String, String>,
    is_secret: bool,
    dry_run: bool,
) -> Result<Vec<OperationResult>> {
    let remote = if is_secret {
        RemoteState::Secrets(provider.list_secret_names().await?)
    } else {
        RemoteState::Variables(provider.list_variables().await?)
    };

    let plan = reconciler::plan(bucket, &remote.names());
    Ok(executor::apply(provider, &plan, bucket, &remote, dry_run).await)
}

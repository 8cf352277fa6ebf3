//! # Mutation Executor
//!
//! Applies a reconciliation plan against the remote store. Live runs spawn
//! one task per operation and wait for the whole batch; a failed operation is
//! captured as that key's result and never cancels its siblings. Dry runs
//! issue zero mutations and report the pre-fetched remote listing instead.

use crate::provider::ActionsProvider;
use crate::reconciler::{OpKind, OperationResult, Plan, RemoteState};
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Apply `plan` to the remote store.
///
/// `bucket` supplies the values for creates and updates; `remote` is the
/// listing fetched before planning and doubles as the dry-run result set.
/// Each key in the plan is touched at most once, so sibling tasks never
/// contend for the same remote entry.
pub async fn apply(
    provider: &Arc<dyn ActionsProvider>,
    plan: &Plan,
    bucket: &BTreeMap<String, String>,
    remote: &RemoteState,
    dry_run: bool,
) -> Vec<OperationResult> {
    let kind = remote.kind_label();
    let dry_run_prefix = if dry_run { "[DRY RUN] " } else { "" };

    for name in &plan.to_create {
        info!("{dry_run_prefix}Creating {kind} {name}...");
    }
    for name in &plan.to_update {
        info!("{dry_run_prefix}Updating {kind} {name}...");
    }
    for name in &plan.to_delete {
        info!("{dry_run_prefix}Deleting {kind} {name}...");
    }

    if dry_run {
        return remote.to_results();
    }

    let is_secret = matches!(remote, RemoteState::Secrets(_));
    let mut pending: Vec<(String, OpKind, JoinHandle<Result<()>>)> = Vec::new();

    for name in &plan.to_create {
        let value = bucket.get(name).cloned().unwrap_or_default();
        pending.push((
            name.clone(),
            OpKind::Create,
            spawn_write(provider, name.clone(), value, is_secret, false),
        ));
    }

    for name in &plan.to_update {
        let value = bucket.get(name).cloned().unwrap_or_default();
        pending.push((
            name.clone(),
            OpKind::Update,
            spawn_write(provider, name.clone(), value, is_secret, true),
        ));
    }

    for name in &plan.to_delete {
        let store = Arc::clone(provider);
        let target = name.clone();
        let handle = tokio::spawn(async move {
            if is_secret {
                store.delete_secret(&target).await
            } else {
                store.delete_variable(&target).await
            }
        });
        pending.push((name.clone(), OpKind::Delete, handle));
    }

    // Batch barrier: wait for every operation, success or failure alike.
    let (meta, handles): (Vec<_>, Vec<_>) = pending
        .into_iter()
        .map(|(name, op, handle)| ((name, op), handle))
        .unzip();
    let outcomes = futures::future::join_all(handles).await;

    meta.into_iter()
        .zip(outcomes)
        .map(|((name, op), outcome)| match outcome {
            Ok(Ok(())) => OperationResult::ok(name, op),
            Ok(Err(e)) => OperationResult::failed(name, op, format!("{e:#}")),
            Err(join_err) => OperationResult::failed(name, op, format!("task failed: {join_err}")),
        })
        .collect()
}

/// Spawn a create/update task for one entry.
///
/// Secrets have a single upsert verb. Variables have no update verb at all:
/// changing a value means delete-then-create inside one task. The sequence is
/// atomic only from the caller's perspective; if the create fails after the
/// delete succeeded, the variable is left absent remotely and the error is
/// surfaced in that key's result.
fn spawn_write(
    provider: &Arc<dyn ActionsProvider>,
    name: String,
    value: String,
    is_secret: bool,
    exists_remotely: bool,
) -> JoinHandle<Result<()>> {
    let store = Arc::clone(provider);
    tokio::spawn(async move {
        if is_secret {
            store.put_secret(&name, &value).await
        } else if exists_remotely {
            store.delete_variable(&name).await?;
            store.create_variable(&name, &value).await
        } else {
            store.create_variable(&name, &value).await
        }
    })
}

//! # Reconciler
//!
//! Computes the set of create/update/delete operations that make the remote
//! store match a local bucket. Planning is a pure function of its inputs:
//! keys present only locally are created, keys present on both sides are
//! updated unconditionally (the store never returns secret values, so there
//! is nothing to diff against; variables follow the same rule for uniform
//! behavior), and keys present only remotely are deleted.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Operation issued against the remote store for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Create,
    Update,
    Delete,
    /// Reported only by dry runs: one per entry already present remotely.
    /// Dry-run output reflects the pre-change remote listing, not a preview
    /// of the post-change state.
    Existing,
}

/// Per-key outcome of applying a planned operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub name: String,
    pub op: OpKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationResult {
    pub fn ok(name: impl Into<String>, op: OpKind) -> Self {
        Self {
            name: name.into(),
            op,
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, op: OpKind, reason: impl ToString) -> Self {
        Self {
            name: name.into(),
            op,
            error: Some(reason.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Snapshot of the remote side of one bucket, fetched before planning.
///
/// Secrets list as names only (the store never exposes stored secret values);
/// variables list with their values.
#[derive(Debug, Clone)]
pub enum RemoteState {
    Secrets(BTreeSet<String>),
    Variables(BTreeMap<String, String>),
}

impl RemoteState {
    /// Remote key names, regardless of kind.
    pub fn names(&self) -> BTreeSet<String> {
        match self {
            RemoteState::Secrets(names) => names.clone(),
            RemoteState::Variables(vars) => vars.keys().cloned().collect(),
        }
    }

    /// Human-readable kind for log lines.
    pub fn kind_label(&self) -> &'static str {
        match self {
            RemoteState::Secrets(_) => "secret",
            RemoteState::Variables(_) => "variable",
        }
    }

    /// Dry-run result list: the pre-existing remote entries, unchanged.
    pub fn to_results(&self) -> Vec<OperationResult> {
        self.names()
            .into_iter()
            .map(|name| OperationResult::ok(name, OpKind::Existing))
            .collect()
    }
}

/// Planned operations for one bucket, disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub to_create: Vec<String>,
    pub to_update: Vec<String>,
    pub to_delete: Vec<String>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Diff a local bucket against the remote key names.
///
/// Output order is sorted within each set, so identical inputs always yield
/// identical plans.
pub fn plan(local: &BTreeMap<String, String>, remote_names: &BTreeSet<String>) -> Plan {
    let mut plan = Plan::default();

    for key in local.keys() {
        if remote_names.contains(key) {
            plan.to_update.push(key.clone());
        } else {
            plan.to_create.push(key.clone());
        }
    }

    for name in remote_names {
        if !local.contains_key(name) {
            plan.to_delete.push(name.clone());
        }
    }

    plan
}

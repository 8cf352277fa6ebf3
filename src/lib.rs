//! # gh-env-sync
//!
//! Syncs GitHub Actions secrets and variables from a local `.env` file.
//!
//! ## Overview
//!
//! One run makes the repository's Actions configuration match the file:
//!
//! 1. **Parsing** - reads line-oriented `KEY=VALUE` entries
//! 2. **Classification** - keys containing a sensitivity indicator (KEY,
//!    TOKEN, SECRET, ...) become repository secrets; the rest become
//!    repository variables; `AWS_PROFILE*` keys are excluded
//! 3. **Reconciliation** - diffs each bucket against the remote listing into
//!    create/update/delete sets
//! 4. **Execution** - applies the plan with one concurrent task per
//!    operation, capturing per-key failures; dry-run mode reports the
//!    pre-existing remote listing and mutates nothing
//!
//! The remote store is reached through the [`provider::ActionsProvider`]
//! trait; [`provider::github::GithubProvider`] is the REST implementation.

pub mod classifier;
pub mod config;
pub mod executor;
pub mod parser;
pub mod provider;
pub mod reconciler;
pub mod sync;

pub use config::SyncConfig;
pub use reconciler::{OpKind, OperationResult, Plan};
pub use sync::SyncReport;

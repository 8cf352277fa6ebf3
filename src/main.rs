//! # gh-env-sync CLI
//!
//! Update GitHub repository secrets and variables from a `.env` file. The
//! file must carry `GH_REPO`, `GH_ACCOUNT`, and `GH_TOKEN` (or they must be
//! in the process environment). Sensitive keys are routed to repository
//! secrets, the rest to repository variables, and the remote store is
//! reconciled to match the file exactly.

use clap::Parser;
use gh_env_sync::provider::github::GithubProvider;
use gh_env_sync::{parser, sync, SyncConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "gh-env-sync",
    about = "Update GitHub repository secrets and variables from a .env file",
    version
)]
struct Cli {
    /// Env file to sync
    #[arg(value_name = "FILENAME", default_value = ".env")]
    filename: PathBuf,

    /// Print the full result structure
    #[arg(short, long)]
    verbose: bool,

    /// Run through the process, but make no changes to GitHub
    #[arg(short, long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gh_env_sync=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.dry_run {
        info!("Dry run mode enabled. No changes will be made to GitHub.");
    }

    let entries = match parser::load_env_file(&cli.filename).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    let config = match SyncConfig::from_entries(&entries) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let provider = match GithubProvider::connect(&config).await {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!(
                "Repo {} not found. Ensure GH_REPO and GH_ACCOUNT are in your env file: {e:#}",
                config.repo
            );
            std::process::exit(1);
        }
    };

    let report = match sync::run(provider, &entries, cli.dry_run).await {
        Ok(report) => report,
        Err(e) => {
            error!("Sync failed: {e:#}");
            std::process::exit(1);
        }
    };

    if cli.verbose {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => error!("Failed to render report: {e}"),
        }
    }

    for failure in report.failures() {
        error!(
            "{} failed: {}",
            failure.name,
            failure.error.as_deref().unwrap_or("unknown error")
        );
    }

    println!(
        "Updated {} secrets and {} variables.",
        report.secrets.len(),
        report.variables.len()
    );
}

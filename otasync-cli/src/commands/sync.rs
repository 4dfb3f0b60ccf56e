//! `otasync sync` — run the fan-out synchronization.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use otasync_store::GithubStore;
use otasync_sync::{pipeline, EntryOutcome, RunSummary};

use super::RepoArgs;

/// Arguments for `otasync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Show what would be written without performing any writes.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.repo.into_config()?;
        let store = GithubStore::new(&cfg);

        let summary = pipeline::run(&cfg, &store, self.dry_run)
            .with_context(|| format!("sync failed for {}/{}", cfg.owner, cfg.repo))?;

        if self.json {
            print_json(&summary)?;
        } else {
            print_summary(&summary, self.dry_run);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    started_at: String,
    finished_at: String,
    updated: usize,
    would_update: usize,
    unchanged: usize,
    failed: usize,
    entries: Vec<EntryJson<'a>>,
}

#[derive(Serialize)]
struct EntryJson<'a> {
    path: &'a str,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_json(summary: &RunSummary) -> Result<()> {
    let entries = summary
        .outcomes
        .iter()
        .map(|outcome| EntryJson {
            path: outcome.path(),
            outcome: match outcome {
                EntryOutcome::Updated { .. } => "updated",
                EntryOutcome::Unchanged { .. } => "unchanged",
                EntryOutcome::WouldUpdate { .. } => "would-update",
                EntryOutcome::Failed { .. } => "failed",
            },
            error: match outcome {
                EntryOutcome::Failed { error, .. } => Some(error.to_string()),
                _ => None,
            },
        })
        .collect();

    let report = SummaryJson {
        started_at: summary.started_at.to_rfc3339(),
        finished_at: summary.finished_at.to_rfc3339(),
        updated: summary.updated(),
        would_update: summary.would_update(),
        unchanged: summary.unchanged(),
        failed: summary.failed(),
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if summary.outcomes.is_empty() {
        println!("{prefix}✓ manifest is empty after trim — nothing to do");
        return;
    }

    println!(
        "{prefix}✓ synced {} entries ({} updated, {} unchanged, {} failed)",
        summary.outcomes.len(),
        summary.updated() + summary.would_update(),
        summary.unchanged(),
        summary.failed(),
    );

    for outcome in &summary.outcomes {
        match outcome {
            EntryOutcome::Updated { path } => println!("  ✎  {path}"),
            EntryOutcome::WouldUpdate { path } => println!("  ~  {path}"),
            EntryOutcome::Unchanged { path } => println!("  ·  {path} (already up to date)"),
            EntryOutcome::Failed { path, error } => {
                println!("  {}  {path}: {error}", "✗".red());
            }
        }
    }
}

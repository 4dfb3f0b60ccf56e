//! Shared sync pipeline entrypoint.
//!
//! One run: fetch the manifest (fatal on failure — zero writes), then sync
//! every trimmed entry in order, collecting one outcome per entry.

use chrono::{DateTime, Utc};

use otasync_core::SyncConfig;
use otasync_store::ContentStore;

use crate::error::SyncError;
use crate::manifest;
use crate::writer::{sync_entry, EntryOutcome};

/// Aggregated result of one sync run.
#[derive(Debug)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One outcome per trimmed-manifest entry, in manifest order.
    pub outcomes: Vec<EntryOutcome>,
}

impl RunSummary {
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Updated { .. }))
    }

    pub fn would_update(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::WouldUpdate { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Unchanged { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&o| pred(o)).count()
    }
}

/// Run the fan-out synchronization once.
///
/// Entry failures are recorded in the summary and never stop the run; only
/// a manifest failure is fatal.
pub fn run(
    cfg: &SyncConfig,
    store: &dyn ContentStore,
    dry_run: bool,
) -> Result<RunSummary, SyncError> {
    let started_at = Utc::now();
    let entries = manifest::fetch(store, &cfg.manifest_path)?;

    let mut outcomes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let outcome = sync_entry(store, index, entry, dry_run);
        if let EntryOutcome::Failed { path, error } = &outcome {
            tracing::warn!("sync failed for {path}: {error}");
        }
        outcomes.push(outcome);
    }

    let finished_at = Utc::now();
    tracing::debug!(
        "run finished in {}ms",
        (finished_at - started_at).num_milliseconds()
    );
    Ok(RunSummary {
        started_at,
        finished_at,
        outcomes,
    })
}

//! Fan-out Writer — canonicalize, compare, and write one artifact per entry.
//!
//! ## `sync_entry` — 4-step protocol
//!
//! 1. Serialize the entry to canonical content (4-space-indented JSON).
//! 2. Read the artifact's current remote content; not-found means empty.
//! 3. Compare whitespace-trimmed existing text to whitespace-trimmed
//!    desired text — equal means skip.
//! 4. Write the desired content with a `Update <path>` commit message,
//!    threading the prior version token when one exists.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use otasync_core::artifact_path;
use otasync_store::{ContentStore, RemoteFile};

use crate::error::EntryError;
use crate::manifest::Entry;

// ---------------------------------------------------------------------------
// Entry outcome
// ---------------------------------------------------------------------------

/// Outcome of syncing a single per-index artifact.
#[derive(Debug)]
pub enum EntryOutcome {
    /// The artifact was created or updated (content differed).
    Updated { path: String },
    /// Remote content already matches; no write performed.
    Unchanged { path: String },
    /// `--dry-run` mode: the artifact *would* have been written.
    WouldUpdate { path: String },
    /// Reading or writing this artifact failed; later entries still run.
    Failed { path: String, error: EntryError },
}

impl EntryOutcome {
    /// Target path of the artifact this outcome is about.
    pub fn path(&self) -> &str {
        match self {
            EntryOutcome::Updated { path }
            | EntryOutcome::Unchanged { path }
            | EntryOutcome::WouldUpdate { path }
            | EntryOutcome::Failed { path, .. } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical serialization
// ---------------------------------------------------------------------------

/// Serialize an entry to canonical content: 4-space-indented JSON with
/// object key order preserved from the source document.
///
/// This text is both the write payload and the comparison basis.
pub fn canonical_json(entry: &Entry) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entry.serialize(&mut ser)?;
    Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
}

// ---------------------------------------------------------------------------
// sync_entry
// ---------------------------------------------------------------------------

/// Bring the artifact for `index` in line with `entry`.
///
/// Reads current remote content, compares whitespace-trimmed text, and
/// writes only on mismatch. A missing artifact counts as empty existing
/// content and takes the create path. All failures are folded into the
/// returned outcome so the caller keeps processing other entries.
pub fn sync_entry(
    store: &dyn ContentStore,
    index: usize,
    entry: &Entry,
    dry_run: bool,
) -> EntryOutcome {
    let path = artifact_path(index);

    let desired = match canonical_json(entry) {
        Ok(desired) => desired,
        Err(err) => {
            return EntryOutcome::Failed {
                path,
                error: err.into(),
            }
        }
    };

    let existing = match store.read(&path) {
        Ok(existing) => existing,
        Err(err) => {
            return EntryOutcome::Failed {
                path,
                error: err.into(),
            }
        }
    };
    let (current, prior_sha) = match &existing {
        Some(RemoteFile { content, sha }) => (content.as_str(), sha.as_deref()),
        None => ("", None),
    };

    if current.trim() == desired.trim() {
        tracing::debug!("unchanged: {path}");
        return EntryOutcome::Unchanged { path };
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {path}");
        return EntryOutcome::WouldUpdate { path };
    }

    let message = format!("Update {path}");
    match store.write(&path, &desired, &message, prior_sha) {
        Ok(()) => {
            tracing::info!("wrote: {path}");
            EntryOutcome::Updated { path }
        }
        Err(err) => EntryOutcome::Failed {
            path,
            error: err.into(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! # otasync-sync
//!
//! Idempotent fan-out synchronization of firmware-upgrade metadata.
//!
//! Call [`pipeline::run`] to fetch the aggregate upgrade manifest and bring
//! every per-index artifact up to date, or [`diff_artifacts`] to preview
//! pending changes without writing anything.

pub mod diff;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod writer;

pub use diff::{diff_artifacts, ArtifactDiff};
pub use error::{EntryError, ManifestError, SyncError};
pub use pipeline::{run, RunSummary};
pub use writer::{canonical_json, sync_entry, EntryOutcome};

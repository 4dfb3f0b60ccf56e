//! Error types for otasync-sync.

use thiserror::Error;

use otasync_store::StoreError;

/// Failures while fetching or decoding the aggregate upgrade manifest.
///
/// Every variant is fatal for the run: no fan-out happens without a
/// manifest, and nothing is retried.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest path does not exist in the repository.
    #[error("manifest not found at {path}")]
    Missing { path: String },

    /// The store returned an envelope with no content.
    #[error("empty content returned for manifest at {path}")]
    Empty { path: String },

    /// The decoded manifest text was not valid JSON.
    #[error("manifest at {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed, but not to a JSON array.
    #[error("manifest at {path} is not a JSON array")]
    NotAnArray { path: String },

    /// The read itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while syncing a single per-index artifact.
///
/// Carried inside a failed entry outcome; never aborts the run.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The entry could not be serialized to canonical JSON.
    #[error("entry could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// All run-fatal errors from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("manifest unavailable: {0}")]
    Manifest(#[from] ManifestError),

    /// A per-artifact read failed while computing a diff preview.
    #[error("failed to inspect {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: EntryError,
    },
}

//! Remote dry-run preview — unified diffs of what sync would write.

use similar::TextDiff;

use otasync_core::{artifact_path, SyncConfig};
use otasync_store::ContentStore;

use crate::error::SyncError;
use crate::manifest;
use crate::writer::canonical_json;

/// A pending change to a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDiff {
    pub path: String,
    pub unified_diff: String,
}

/// Render what a sync run would write and diff it against current remote
/// content. Artifacts whose content already matches are omitted.
///
/// No writes are performed.
pub fn diff_artifacts(
    cfg: &SyncConfig,
    store: &dyn ContentStore,
) -> Result<Vec<ArtifactDiff>, SyncError> {
    let entries = manifest::fetch(store, &cfg.manifest_path)?;

    let mut diffs = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let path = artifact_path(index);
        let desired = canonical_json(entry).map_err(|source| SyncError::Artifact {
            path: path.clone(),
            source: source.into(),
        })?;
        let existing = store
            .read(&path)
            .map_err(|source| SyncError::Artifact {
                path: path.clone(),
                source: source.into(),
            })?
            .map(|file| file.content)
            .unwrap_or_default();

        if existing.trim() == desired.trim() {
            continue;
        }

        let old_header = format!("a/{path}");
        let new_header = format!("b/{path}");
        let unified = TextDiff::from_lines(&existing, &desired)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(ArtifactDiff {
            path,
            unified_diff: unified,
        });
    }

    Ok(diffs)
}

//! Source Reader — fetch and trim the aggregate upgrade manifest.

use serde_json::Value;

use otasync_store::ContentStore;

use crate::error::ManifestError;

/// One trimmed-manifest element: an opaque firmware descriptor.
pub type Entry = Value;

/// Fetch the upgrade manifest at `path` and return its entries in order.
///
/// The manifest's final element is a trailer the upstream document always
/// carries; it is discarded before fan-out and never interpreted. Trimming
/// an empty array is a no-op.
///
/// Every failure here is terminal for the run: no retry, no partial
/// manifest.
pub fn fetch(store: &dyn ContentStore, path: &str) -> Result<Vec<Entry>, ManifestError> {
    let file = store.read(path)?.ok_or_else(|| ManifestError::Missing {
        path: path.to_owned(),
    })?;

    if file.content.trim().is_empty() {
        return Err(ManifestError::Empty {
            path: path.to_owned(),
        });
    }

    let decoded: Value =
        serde_json::from_str(&file.content).map_err(|source| ManifestError::Parse {
            path: path.to_owned(),
            source,
        })?;
    let Value::Array(mut entries) = decoded else {
        return Err(ManifestError::NotAnArray {
            path: path.to_owned(),
        });
    };

    let total = entries.len();
    entries.pop();
    tracing::debug!(
        "fetched manifest at {path}: {total} elements, {} after trim",
        entries.len()
    );
    Ok(entries)
}

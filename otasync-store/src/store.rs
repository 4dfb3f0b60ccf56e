//! Content-store contract the sync pipeline is written against.

use crate::error::StoreError;

/// A file as the remote store currently holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Decoded text content.
    pub content: String,
    /// Store-side content version token, when the store reports one.
    /// Threaded back into [`ContentStore::write`] on updates.
    pub sha: Option<String>,
}

/// Abstraction over a path-keyed remote content store.
///
/// Every operation is one blocking request; no retries happen at this level.
pub trait ContentStore {
    /// Read the file at `path`.
    ///
    /// Returns `Ok(None)` when the store reports the path does not exist.
    fn read(&self, path: &str) -> Result<Option<RemoteFile>, StoreError>;

    /// Create or update the file at `path`, recording `message` as the
    /// commit message. `prior_sha` must be the version token of the existing
    /// file when updating, `None` when creating.
    fn write(
        &self,
        path: &str,
        content: &str,
        message: &str,
        prior_sha: Option<&str>,
    ) -> Result<(), StoreError>;
}

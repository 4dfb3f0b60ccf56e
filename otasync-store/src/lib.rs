//! # otasync-store
//!
//! Remote content-store contract and the GitHub contents-API client.
//!
//! The sync pipeline only ever talks to [`ContentStore`]; [`GithubStore`]
//! is the production implementation.

pub mod error;
pub mod github;
pub mod store;

pub use error::StoreError;
pub use github::GithubStore;
pub use store::{ContentStore, RemoteFile};

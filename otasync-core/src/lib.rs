//! otasync core library — run configuration and errors.
//!
//! Public API surface:
//! - [`config`] — [`SyncConfig`], [`AccessToken`], the artifact path template
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;

pub use config::{artifact_path, AccessToken, SyncConfig};
pub use error::ConfigError;

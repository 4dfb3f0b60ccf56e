//! Error types for otasync-core.

use thiserror::Error;

/// All errors that can arise while building the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bearer token environment variable was unset or empty.
    #[error("missing access token: set the {0} environment variable")]
    MissingToken(&'static str),
}

//! Run configuration.
//!
//! Repository coordinates are collected once at process start into an
//! immutable [`SyncConfig`] and passed by reference to the store and the
//! pipeline; nothing mutates them after startup.

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Repository owner the manifest and artifacts live under.
pub const DEFAULT_OWNER: &str = "lunDreame";
/// Repository name.
pub const DEFAULT_REPO: &str = "lundreame.github.io";
/// Branch all reads and writes target.
pub const DEFAULT_BRANCH: &str = "main";
/// Path of the aggregate upgrade manifest within the repository.
pub const DEFAULT_MANIFEST_PATH: &str = "assets/upgrade.json";
/// Environment variable supplying the bearer token.
pub const TOKEN_ENV: &str = "ACCESS_TOKEN";

/// Bearer token for the remote content store.
///
/// `Debug` is redacted so the secret cannot end up in logs or panic output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

impl From<String> for AccessToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccessToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Immutable configuration for one sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub manifest_path: String,
    pub token: AccessToken,
}

impl SyncConfig {
    /// Build a config from explicit repository coordinates plus the
    /// [`TOKEN_ENV`] environment variable.
    ///
    /// A missing or empty token is fatal: every remote call needs one.
    pub fn from_env(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        manifest_path: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token = env::var(TOKEN_ENV).unwrap_or_default();
        if token.is_empty() {
            return Err(ConfigError::MissingToken(TOKEN_ENV));
        }
        Ok(Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            manifest_path: manifest_path.into(),
            token: AccessToken(token),
        })
    }
}

/// Target path for the per-index firmware artifact.
///
/// Deterministic pure function of the 0-based post-trim entry index.
pub fn artifact_path(index: usize) -> String {
    format!("self_mqttx/main{index}_firmware.json")
}

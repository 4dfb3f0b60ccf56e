//! Subcommand implementations.

pub mod diff;
pub mod sync;

use anyhow::{Context, Result};
use clap::Args;

use otasync_core::{config, SyncConfig};

/// Repository coordinates shared by every subcommand.
///
/// Defaults mirror the deployment this tool was built for; the token always
/// comes from the environment.
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Repository owner.
    #[arg(long, default_value = config::DEFAULT_OWNER)]
    pub owner: String,

    /// Repository name.
    #[arg(long, default_value = config::DEFAULT_REPO)]
    pub repo: String,

    /// Branch all reads and writes target.
    #[arg(long, default_value = config::DEFAULT_BRANCH)]
    pub branch: String,

    /// Path of the aggregate upgrade manifest within the repository.
    #[arg(long, default_value = config::DEFAULT_MANIFEST_PATH)]
    pub manifest_path: String,
}

impl RepoArgs {
    pub fn into_config(self) -> Result<SyncConfig> {
        SyncConfig::from_env(self.owner, self.repo, self.branch, self.manifest_path)
            .context("could not build run configuration")
    }
}

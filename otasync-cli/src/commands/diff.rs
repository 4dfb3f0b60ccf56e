//! `otasync diff` — show unified diffs of what sync would write.

use anyhow::{Context, Result};
use clap::Args;

use otasync_store::GithubStore;
use otasync_sync::diff_artifacts;

use super::RepoArgs;

/// Arguments for `otasync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub repo: RepoArgs,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.repo.into_config()?;
        let store = GithubStore::new(&cfg);

        let diffs = diff_artifacts(&cfg, &store)
            .with_context(|| format!("diff failed for {}/{}", cfg.owner, cfg.repo))?;

        if diffs.is_empty() {
            println!("No pending changes.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}

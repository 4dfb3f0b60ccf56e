//! otasync — firmware-metadata fan-out synchronizer.
//!
//! # Usage
//!
//! ```text
//! otasync sync [--dry-run] [--json] [--owner <o> --repo <r> --branch <b> --manifest-path <p>]
//! otasync diff [--owner <o> --repo <r> --branch <b> --manifest-path <p>]
//! ```
//!
//! Reads the aggregate upgrade manifest from the configured repository and
//! brings every per-index firmware artifact up to date, writing only the
//! artifacts whose content actually changed. The bearer token is taken from
//! the `ACCESS_TOKEN` environment variable.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "otasync",
    version,
    about = "Synchronize firmware-upgrade metadata into per-device artifact files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the upgrade manifest and update changed artifacts.
    Sync(SyncArgs),

    /// Show unified diffs of what sync would write.
    Diff(DiffArgs),
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}

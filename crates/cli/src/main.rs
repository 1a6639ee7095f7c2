use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ffix_core::{BatchOptions, BatchRunner, FfmpegRemuxer};

/// Batch-remux video files from one directory into another.
///
/// Every video file in PATH is stream-copied (no re-encoding) into the
/// output directory under its original name. Originals are deleted after a
/// successful conversion unless --keep is given.
#[derive(Parser)]
#[command(name = "ffix", version)]
struct Cli {
    /// Source directory scanned for video files (non-recursive)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Destination directory, created on demand
    #[arg(short = 'o', long)]
    out_path: PathBuf,

    /// Keep original files after a successful conversion
    #[arg(short = 'k', long, action = ArgAction::SetTrue, overrides_with = "no_keep")]
    keep: bool,

    /// Delete original files after a successful conversion (default)
    #[arg(long, action = ArgAction::SetTrue, overrides_with = "keep")]
    no_keep: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let options = BatchOptions::new(cli.out_path)
        .with_source_path(cli.path)
        .with_keep_originals(cli.keep);

    let runner = BatchRunner::new(options, FfmpegRemuxer::with_defaults());

    // Per-file failures are reported as they happen and do not affect the
    // exit code; only a failure to read the source directory is fatal.
    runner
        .run()
        .await
        .context("Failed to scan source directory")?;

    Ok(())
}

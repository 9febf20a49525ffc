use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use feedbuild::{feed, scan};

#[derive(Parser, Debug)]
#[command(
    name = "feedbuild",
    about = "Generate an RSS feed from filename-tagged alert/post files"
)]
struct Args {
    /// Directory to scan (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output feed path (defaults to rss.xml inside the scanned directory)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    let output = args
        .output
        .unwrap_or_else(|| dir.join(scan::OUTPUT_FILENAME));

    let entries = scan::collect_entries(&dir)
        .with_context(|| format!("Failed to scan '{}'", dir.display()))?;
    tracing::info!(entries = entries.len(), dir = %dir.display(), "Collected feed entries");

    feed::write_feed(&entries, &output)
        .with_context(|| format!("Failed to write feed to '{}'", output.display()))?;

    println!("Wrote {} entries to {}", entries.len(), output.display());
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cafebook::services::icons::generate_icons;

/// Renders the favicon, touch and PWA icon set plus `site.webmanifest`.
#[derive(Parser)]
#[command(name = "generate-icons")]
struct Args {
    /// Source image, ideally square and at least 512px.
    source: PathBuf,

    /// Directory the icons and manifest are written to.
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let written = generate_icons(&args.source, &args.out_dir)?;
    tracing::info!(count = written.len(), out_dir = %args.out_dir.display(), "icons generated");

    Ok(())
}

//! Command-line entry point for brand card generation

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use brand_cards::{Pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate rounded brand logo cards from a CSV of logo sources", long_about = None)]
struct Args {
    /// Path to the input CSV (columns: brand, website, brandfetch_logo, clearbit_logo)
    #[arg(long)]
    input: PathBuf,

    /// Output directory for the rendered PNG cards
    #[arg(long, default_value = "output")]
    outdir: PathBuf,

    /// Path of the final ZIP archive
    #[arg(long, default_value = "brand_logo_cards.zip")]
    archive: PathBuf,

    /// Corner radius in pixels
    #[arg(long, default_value_t = 40)]
    radius: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = PipelineConfig::with_paths(args.input, args.outdir, args.archive);
    config.card.corner_radius = args.radius;

    let pipeline = Pipeline::new(config).context("failed to initialize pipeline")?;
    let summary = pipeline.run()?;

    println!(
        "Produced {} cards ({} skipped). Archive: {}",
        summary.produced,
        summary.skipped,
        summary.archive.display()
    );

    Ok(())
}

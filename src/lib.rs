//! # Brand Cards
//!
//! A library and CLI tool for generating square brand logo cards from a
//! spreadsheet of logo sources.
//!
//! For each brand row the pipeline:
//! - Fetches the logo through a fallback chain (Brandfetch, then Clearbit,
//!   then the official site's favicon)
//! - Derives a card background from the logo's dominant non-white color
//! - Recolors the logo to a white silhouette when contrast would be poor
//! - Composites the logo centered on a 600×600 rounded-corner canvas
//! - Writes the card as a PNG and bundles all cards into a ZIP archive
//!
//! Records are processed sequentially; a record whose sources all fail is
//! logged and skipped without aborting the run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use brand_cards::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::with_paths("brands.csv", "output", "cards.zip");
//! let summary = Pipeline::new(config)?.run()?;
//! println!("{} cards produced, {} skipped", summary.produced, summary.skipped);
//! # Ok::<(), brand_cards::CardGenError>(())
//! ```

pub mod archive;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod records;
pub mod render;

pub use config::PipelineConfig;
pub use error::{CardGenError, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use records::BrandRecord;

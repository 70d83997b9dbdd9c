//! End-to-end orchestration: spreadsheet in, card files and archive out
//!
//! Records are processed strictly sequentially, one at a time. A record that
//! fails anywhere in fetch → analyze → decide → render → save is logged and
//! skipped; only startup and archive errors abort the run. Logo sources are
//! flaky third parties, so continue-on-error is the point, not a concession.

use image::ImageFormat;
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::archive::bundle_cards;
use crate::color::{ContrastDecider, DominantColorAnalyzer};
use crate::config::PipelineConfig;
use crate::error::{CardGenError, Result};
use crate::fetch::LogoFetcher;
use crate::records::{read_records, slugify, BrandRecord};
use crate::render::CardRenderer;

/// End-of-run accounting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Cards written to the output directory
    pub produced: usize,
    /// Records skipped after a recoverable failure
    pub skipped: usize,
    /// Where the archive was written
    pub archive: PathBuf,
}

/// Sequential card generation pipeline
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: LogoFetcher,
    analyzer: DominantColorAnalyzer,
    decider: ContrastDecider,
    renderer: CardRenderer,
}

impl Pipeline {
    /// Wire up all components from one configuration.
    ///
    /// # Errors
    ///
    /// Returns `CardGenError::HttpClient` if the fetcher cannot be built.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let fetcher = LogoFetcher::new(&config.fetch)?;
        let analyzer = DominantColorAnalyzer::from_config(&config.analysis);
        let decider = ContrastDecider::from_config(&config.contrast);
        let renderer = CardRenderer::from_config(&config.card);

        Ok(Self {
            config,
            fetcher,
            analyzer,
            decider,
            renderer,
        })
    }

    /// Process every record and bundle the results.
    ///
    /// Row order determines processing order. Rows with a blank brand name
    /// are ignored. One warn line is logged per skipped record, naming the
    /// brand and the reason.
    ///
    /// # Errors
    ///
    /// Propagates spreadsheet, output directory, and archive errors; all
    /// per-record errors are absorbed into the skip count.
    pub fn run(&self) -> Result<RunSummary> {
        let records = read_records(&self.config.input_path)?;

        std::fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            CardGenError::InvalidOutputPath {
                path: self.config.output_dir.clone(),
                source: e,
            }
        })?;

        let mut produced = Vec::new();
        let mut skipped = 0usize;

        for record in &records {
            if record.name.trim().is_empty() {
                continue;
            }

            match self.process_record(record) {
                Ok(path) => {
                    info!("[ok] {} -> {}", record.name, path.display());
                    produced.push(path);
                }
                Err(e) if e.is_recoverable() => {
                    warn!("[skip] {}: {}", record.name, e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        bundle_cards(&produced, &self.config.archive_path)?;

        let summary = RunSummary {
            produced: produced.len(),
            skipped,
            archive: self.config.archive_path.clone(),
        };
        info!(
            "Produced {} cards, skipped {}. Archive: {}",
            summary.produced,
            summary.skipped,
            summary.archive.display()
        );
        Ok(summary)
    }

    /// One record: fetch → analyze → decide → render → save
    fn process_record(&self, record: &BrandRecord) -> Result<PathBuf> {
        let fetched = self.fetcher.fetch(record)?;
        debug!("{}: fetched logo from {} source", record.name, fetched.source);

        let background = self.analyzer.dominant_color(&fetched.image);
        let recolor = self.decider.needs_white_recolor(background, &fetched.image);
        if recolor {
            debug!("{}: recoloring logo to white for contrast", record.name);
        }

        let card = self.renderer.render(background, &fetched.image, recolor)?;

        let path = self
            .config
            .output_dir
            .join(format!("{}.png", slugify(&record.name)));
        card.save_with_format(&path, ImageFormat::Png)
            .map_err(|e| CardGenError::ImageWrite {
                path: path.clone(),
                source: e,
            })?;

        Ok(path)
    }
}

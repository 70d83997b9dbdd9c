//! Configuration structures for the card generation pipeline.
//!
//! This module defines all tunable parameters for fetching, color analysis,
//! contrast decisions, and rendering, organized into logical groups.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use brand_cards::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or build from paths with default tuning
//! let config = PipelineConfig::with_paths("brands.csv", "output", "cards.zip");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants;

/// Complete pipeline configuration for one card generation run.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input spreadsheet (CSV) path
    pub input_path: PathBuf,

    /// Output directory for rendered cards
    pub output_dir: PathBuf,

    /// Path of the final ZIP archive
    pub archive_path: PathBuf,

    /// Logo fetching configuration
    pub fetch: FetchConfig,

    /// Dominant color analysis configuration
    pub analysis: AnalysisConfig,

    /// Contrast decision configuration
    pub contrast: ContrastConfig,

    /// Card rendering configuration
    pub card: CardConfig,
}

/// Network parameters for logo fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Dominant color sampling parameters.
///
/// Controls which pixels qualify for the background color histogram and how
/// near-duplicate shades are merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Channels above this value on all of R, G, B mark a pixel as
    /// near-white background noise
    pub near_white_min_channel: u8,

    /// Minimum alpha for a pixel to count as opaque
    pub min_opaque_alpha: u8,

    /// Low bits dropped per channel when bucketing shades
    pub quant_shift: u8,

    /// Neutral background used when no qualifying pixel exists
    pub fallback_background: RgbColor,
}

/// Contrast decision parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Minimum WCAG contrast ratio before the logo is recolored to white
    pub min_ratio: f32,
}

/// Card rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Card edge length in pixels
    pub canvas_size: u32,

    /// Corner radius of the rounded-rectangle clip in pixels
    pub corner_radius: u32,

    /// Largest fraction of the canvas edge the logo may occupy
    pub logo_max_ratio: f32,
}

/// RGB color representation for configuration files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<RgbColor> for Srgb<u8> {
    fn from(color: RgbColor) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::network::TIMEOUT_SECS,
            user_agent: constants::network::USER_AGENT.to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            near_white_min_channel: constants::color::NEAR_WHITE_MIN_CHANNEL,
            min_opaque_alpha: constants::color::MIN_OPAQUE_ALPHA,
            quant_shift: constants::color::QUANT_SHIFT,
            fallback_background: RgbColor {
                r: constants::color::FALLBACK_BACKGROUND[0],
                g: constants::color::FALLBACK_BACKGROUND[1],
                b: constants::color::FALLBACK_BACKGROUND[2],
            },
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            min_ratio: constants::contrast::MIN_CONTRAST_RATIO,
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            canvas_size: constants::canvas::SIZE,
            corner_radius: constants::canvas::CORNER_RADIUS,
            logo_max_ratio: constants::canvas::LOGO_MAX_RATIO,
        }
    }
}

impl PipelineConfig {
    /// Build a configuration with default tuning for the given paths
    pub fn with_paths(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        archive_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            archive_path: archive_path.into(),
            fetch: FetchConfig::default(),
            analysis: AnalysisConfig::default(),
            contrast: ContrastConfig::default(),
            card: CardConfig::default(),
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_matches_constants() {
        let config = PipelineConfig::with_paths("brands.csv", "output", "cards.zip");

        assert_eq!(config.card.canvas_size, constants::canvas::SIZE);
        assert_eq!(config.card.corner_radius, constants::canvas::CORNER_RADIUS);
        assert_eq!(
            config.analysis.near_white_min_channel,
            constants::color::NEAR_WHITE_MIN_CHANNEL
        );
        assert_eq!(config.fetch.timeout_secs, constants::network::TIMEOUT_SECS);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig::with_paths("brands.csv", "output", "cards.zip");

        let json = serde_json::to_string(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.input_path, config.input_path);
        assert_eq!(parsed.card.logo_max_ratio, config.card.logo_max_ratio);
        assert_eq!(parsed.contrast.min_ratio, config.contrast.min_ratio);
    }

    #[test]
    fn test_rgb_color_conversion() {
        let color = RgbColor { r: 10, g: 20, b: 30 };
        let srgb: Srgb<u8> = color.into();

        assert_eq!(srgb.red, 10);
        assert_eq!(srgb.green, 20);
        assert_eq!(srgb.blue, 30);
    }
}

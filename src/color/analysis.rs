//! Dominant non-white color extraction
//!
//! Picks a card background color that is visually derived from the logo:
//! - Transparent and near-white pixels are excluded (most logos sit on
//!   white or transparent backgrounds, which carry no brand identity)
//! - Remaining shades are bucketed per channel to merge near-duplicates
//! - The most frequent bucket wins, with a deterministic tie-break
//! - A fixed neutral fallback covers logos with no qualifying pixel

use image::{imageops, RgbaImage};
use palette::Srgb;
use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::constants::color::{
    FALLBACK_BACKGROUND, MIN_OPAQUE_ALPHA, NEAR_WHITE_MIN_CHANNEL, QUANT_SHIFT, SAMPLE_EDGE,
};

/// Dominant color analyzer with configurable qualification thresholds
pub struct DominantColorAnalyzer {
    near_white_min: u8,
    min_alpha: u8,
    quant_shift: u8,
    fallback: Srgb<u8>,
}

impl Default for DominantColorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DominantColorAnalyzer {
    /// Create an analyzer with default thresholds
    pub fn new() -> Self {
        Self {
            near_white_min: NEAR_WHITE_MIN_CHANNEL,
            min_alpha: MIN_OPAQUE_ALPHA,
            quant_shift: QUANT_SHIFT,
            fallback: Srgb::new(
                FALLBACK_BACKGROUND[0],
                FALLBACK_BACKGROUND[1],
                FALLBACK_BACKGROUND[2],
            ),
        }
    }

    /// Create an analyzer with custom thresholds
    pub fn with_params(near_white_min: u8, min_alpha: u8, quant_shift: u8) -> Self {
        Self {
            near_white_min,
            min_alpha,
            quant_shift,
            ..Self::new()
        }
    }

    /// Create an analyzer from pipeline configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            near_white_min: config.near_white_min_channel,
            min_alpha: config.min_opaque_alpha,
            quant_shift: config.quant_shift,
            fallback: config.fallback_background.into(),
        }
    }

    /// Compute the dominant qualifying color of an image.
    ///
    /// The result is deterministic for a fixed image and fixed thresholds:
    /// bucket counts decide, and ties fall to the larger bucket key.
    pub fn dominant_color(&self, image: &RgbaImage) -> Srgb<u8> {
        let sampled;
        let source = if image.width().max(image.height()) > SAMPLE_EDGE {
            sampled = downsample(image);
            &sampled
        } else {
            image
        };

        let mut histogram: HashMap<(u8, u8, u8), u32> = HashMap::new();
        for pixel in source.pixels() {
            let [r, g, b, a] = pixel.0;
            if a < self.min_alpha {
                continue;
            }
            if r > self.near_white_min && g > self.near_white_min && b > self.near_white_min {
                continue;
            }
            let key = (r >> self.quant_shift, g >> self.quant_shift, b >> self.quant_shift);
            *histogram.entry(key).or_insert(0) += 1;
        }

        match histogram.into_iter().max_by_key(|&(key, count)| (count, key)) {
            Some((key, _)) => self.bucket_midpoint(key),
            None => self.fallback,
        }
    }

    /// Reconstruct the representative color at the center of a bucket
    fn bucket_midpoint(&self, (r, g, b): (u8, u8, u8)) -> Srgb<u8> {
        let half = (1u8 << self.quant_shift) >> 1;
        Srgb::new(
            (r << self.quant_shift) | half,
            (g << self.quant_shift) | half,
            (b << self.quant_shift) | half,
        )
    }
}

/// Shrink an image to fit within the fixed sampling edge, preserving aspect
/// ratio. The box filter used here is deterministic.
fn downsample(image: &RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let scale = SAMPLE_EDGE as f32 / w.max(h) as f32;
    let nw = ((w as f32 * scale) as u32).max(1);
    let nh = ((h as f32 * scale) as u32).max(1);
    imageops::thumbnail(image, nw, nh)
}

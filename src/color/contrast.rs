//! Contrast decision between a card background and its logo
//!
//! Uses the WCAG relative luminance model: when the contrast ratio between
//! the computed background and the logo's own average color drops below a
//! fixed threshold, the logo is recolored to solid white before compositing.

use image::RgbaImage;
use palette::Srgb;

use crate::config::ContrastConfig;
use crate::constants::color::MIN_OPAQUE_ALPHA;
use crate::constants::contrast::MIN_CONTRAST_RATIO;

/// WCAG relative luminance of an sRGB color.
///
/// Channels are linearized with the standard piecewise curve and weighted by
/// eye sensitivity to red, green, and blue.
pub fn relative_luminance(color: Srgb<u8>) -> f32 {
    let srgb: Srgb<f32> = color.into_format();
    let channel = |c: f32| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(srgb.red) + 0.7152 * channel(srgb.green) + 0.0722 * channel(srgb.blue)
}

/// WCAG contrast ratio between two colors, in `[1.0, 21.0]`.
/// Symmetric in its arguments.
pub fn contrast_ratio(a: Srgb<u8>, b: Srgb<u8>) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Mean color of a logo's opaque pixels, or `None` when the image is fully
/// transparent.
pub fn average_opaque_color(image: &RgbaImage, min_alpha: u8) -> Option<Srgb<u8>> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;

    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < min_alpha {
            continue;
        }
        sums[0] += r as u64;
        sums[1] += g as u64;
        sums[2] += b as u64;
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some(Srgb::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ))
}

/// Decides whether a logo must be recolored to white for legibility
pub struct ContrastDecider {
    min_ratio: f32,
    min_alpha: u8,
}

impl Default for ContrastDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl ContrastDecider {
    /// Create a decider with the default contrast threshold
    pub fn new() -> Self {
        Self {
            min_ratio: MIN_CONTRAST_RATIO,
            min_alpha: MIN_OPAQUE_ALPHA,
        }
    }

    /// Create a decider with a custom threshold
    pub fn with_params(min_ratio: f32, min_alpha: u8) -> Self {
        Self { min_ratio, min_alpha }
    }

    /// Create a decider from pipeline configuration
    pub fn from_config(config: &ContrastConfig) -> Self {
        Self {
            min_ratio: config.min_ratio,
            min_alpha: MIN_OPAQUE_ALPHA,
        }
    }

    /// True when the logo's average color has insufficient contrast against
    /// the background and must become a white silhouette.
    ///
    /// Pure function of the two inputs: no state is consulted or mutated.
    /// A fully transparent logo needs no recolor.
    pub fn needs_white_recolor(&self, background: Srgb<u8>, logo: &RgbaImage) -> bool {
        match average_opaque_color(logo, self.min_alpha) {
            Some(logo_color) => contrast_ratio(logo_color, background) < self.min_ratio,
            None => false,
        }
    }
}

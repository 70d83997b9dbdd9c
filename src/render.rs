//! Card rendering: rounded background, fitted logo, optional white recolor
//!
//! Produces the final 600×600 RGBA card. Rendering is pure: the same
//! background, logo, and recolor flag always produce a pixel-identical card,
//! and persistence is left entirely to the caller.

use image::{imageops, Rgba, RgbaImage};
use palette::Srgb;

use crate::config::CardConfig;
use crate::constants::canvas::{CORNER_RADIUS, LOGO_MAX_RATIO, SIZE};
use crate::error::{CardGenError, Result};

/// Renders fixed-size rounded cards from a background color and a logo
pub struct CardRenderer {
    canvas_size: u32,
    corner_radius: u32,
    logo_max_ratio: f32,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CardRenderer {
    /// Create a renderer with the default card geometry
    pub fn new() -> Self {
        Self {
            canvas_size: SIZE,
            corner_radius: CORNER_RADIUS,
            logo_max_ratio: LOGO_MAX_RATIO,
        }
    }

    /// Create a renderer with custom geometry
    pub fn with_params(canvas_size: u32, corner_radius: u32, logo_max_ratio: f32) -> Self {
        Self {
            canvas_size,
            corner_radius,
            logo_max_ratio,
        }
    }

    /// Create a renderer from pipeline configuration
    pub fn from_config(config: &CardConfig) -> Self {
        Self {
            canvas_size: config.canvas_size,
            corner_radius: config.corner_radius,
            logo_max_ratio: config.logo_max_ratio,
        }
    }

    /// Render one card.
    ///
    /// The background fills a rounded rectangle covering the whole canvas;
    /// pixels outside the corner radius stay fully transparent. The logo is
    /// scaled preserving aspect ratio into the padded center region and
    /// alpha-composited on top, recolored to a white silhouette first when
    /// `recolor_to_white` is set.
    ///
    /// # Errors
    ///
    /// Returns `CardGenError::Render` for a logo with a zero dimension.
    pub fn render(
        &self,
        background: Srgb<u8>,
        logo: &RgbaImage,
        recolor_to_white: bool,
    ) -> Result<RgbaImage> {
        if logo.width() == 0 || logo.height() == 0 {
            return Err(CardGenError::Render {
                reason: format!("logo has zero dimension: {}x{}", logo.width(), logo.height()),
            });
        }

        let mut card = RgbaImage::new(self.canvas_size, self.canvas_size);
        let fill = Rgba([background.red, background.green, background.blue, 255]);
        for (x, y, pixel) in card.enumerate_pixels_mut() {
            if self.inside_rounded_rect(x, y) {
                *pixel = fill;
            }
        }

        let mut fitted = self.fit_logo(logo);
        if recolor_to_white {
            fitted = recolor_to_white_silhouette(&fitted);
        }

        let x = (self.canvas_size - fitted.width()) / 2;
        let y = (self.canvas_size - fitted.height()) / 2;
        imageops::overlay(&mut card, &fitted, x as i64, y as i64);

        Ok(card)
    }

    /// Rounded-rectangle membership test, sampled at pixel centers.
    ///
    /// Distance to the rectangle inset by the corner radius: zero along the
    /// straight edges, positive only inside the corner squares.
    fn inside_rounded_rect(&self, x: u32, y: u32) -> bool {
        let r = self.corner_radius as f32;
        let size = self.canvas_size as f32;
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;

        let dx = if px < r {
            r - px
        } else if px > size - r {
            px - (size - r)
        } else {
            0.0
        };
        let dy = if py < r {
            r - py
        } else if py > size - r {
            py - (size - r)
        } else {
            0.0
        };

        dx * dx + dy * dy <= r * r
    }

    /// Scale the logo preserving aspect ratio so it fits the padded region
    fn fit_logo(&self, logo: &RgbaImage) -> RgbaImage {
        let target = (self.canvas_size as f32 * self.logo_max_ratio).round();
        let (w, h) = logo.dimensions();
        let scale = (target / w as f32).min(target / h as f32);
        let nw = ((w as f32 * scale) as u32).max(1);
        let nh = ((h as f32 * scale) as u32).max(1);
        imageops::resize(logo, nw, nh, imageops::FilterType::Lanczos3)
    }
}

/// Turn every visible pixel pure white, preserving the alpha channel.
/// Transparent pixels are left untouched.
pub fn recolor_to_white_silhouette(logo: &RgbaImage) -> RgbaImage {
    let mut out = logo.clone();
    for pixel in out.pixels_mut() {
        let alpha = pixel.0[3];
        if alpha != 0 {
            pixel.0 = [255, 255, 255, alpha];
        }
    }
    out
}

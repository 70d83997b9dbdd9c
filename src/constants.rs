//! Fixed tuning constants for card generation
//!
//! All thresholds used by the analyzer, contrast decision, and renderer live
//! here as named constants so the logic stays independently testable.

/// Card canvas geometry
pub mod canvas {
    /// Card edge length in pixels (cards are square)
    pub const SIZE: u32 = 600;

    /// Corner radius of the rounded-rectangle clip in pixels
    pub const CORNER_RADIUS: u32 = 40;

    /// Largest fraction of the canvas edge the logo may occupy.
    /// The remainder is margin so the logo never touches the rounded edges.
    pub const LOGO_MAX_RATIO: f32 = 0.62;
}

/// Dominant color sampling thresholds
pub mod color {
    /// A pixel counts as near-white background noise when every channel
    /// exceeds this value
    pub const NEAR_WHITE_MIN_CHANNEL: u8 = 240;

    /// Pixels with alpha below this are treated as transparent and ignored
    pub const MIN_OPAQUE_ALPHA: u8 = 10;

    /// Low bits dropped per channel when bucketing near-duplicate shades
    pub const QUANT_SHIFT: u8 = 3;

    /// Images are downsampled to fit within this edge before sampling
    pub const SAMPLE_EDGE: u32 = 64;

    /// Neutral background used when no qualifying pixel exists
    /// (e.g. a white logo on a transparent background)
    pub const FALLBACK_BACKGROUND: [u8; 3] = [245, 245, 245];
}

/// Contrast decision thresholds
pub mod contrast {
    /// Minimum WCAG contrast ratio between background and logo before the
    /// logo is recolored to white
    pub const MIN_CONTRAST_RATIO: f32 = 2.5;
}

/// Network defaults for logo fetching
pub mod network {
    /// Per-request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 15;

    /// User-Agent sent with every logo request
    pub const USER_AGENT: &str = "Mozilla/5.0 (LogoFetcher/1.0)";
}

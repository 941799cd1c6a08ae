//! The typed parameter set.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::dither::DitherStyle;

/// Parameters for one pipeline invocation.
///
/// Part of the pipeline's cache key: two runs with equal params over the same
/// source reuse the dithered and bloom layers.
///
/// # Defaults
///
/// - style: bayer
/// - strength: 1.0
/// - levels: 4
/// - colors: black to white
/// - bloom: disabled, intensity 4.0
///
/// # Example
///
/// ```
/// use tone_dither::{Color, DitherStyle, PipelineParams};
///
/// let params = PipelineParams::new()
///     .style(DitherStyle::Contour)
///     .strength(0.5)
///     .levels(6)
///     .colors(Color::new(20, 0, 60), Color::new(255, 220, 120))
///     .bloom(true)
///     .bloom_intensity(8.0);
///
/// assert_eq!(params.levels, 6);
/// assert!(params.bloom_enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Dithering style.
    pub style: DitherStyle,

    /// Pattern strength, `>= 0`. Scales the threshold for bayer/crosshatch,
    /// shrinks halftone cells and raises contour frequency.
    pub strength: f32,

    /// Number of output levels, `>= 1`.
    pub levels: u32,

    /// Color for the darkest level.
    pub color_start: Color,

    /// Color for the brightest level.
    pub color_end: Color,

    /// Whether the bloom layer is generated and blended.
    pub bloom_enabled: bool,

    /// Bloom blur radius in pixels, `>= 0`. Zero disables the blur but not
    /// the bloom layer.
    pub bloom_intensity: f32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            style: DitherStyle::Bayer,
            strength: 1.0,
            levels: 4,
            color_start: Color::BLACK,
            color_end: Color::WHITE,
            bloom_enabled: false,
            bloom_intensity: 4.0,
        }
    }
}

impl PipelineParams {
    /// Create parameters with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn style(mut self, style: DitherStyle) -> Self {
        self.style = style;
        self
    }

    /// Set pattern strength. Negative or NaN values become 0.
    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = non_negative(strength);
        self
    }

    /// Set the level count. 0 becomes 1.
    #[inline]
    pub fn levels(mut self, levels: u32) -> Self {
        self.levels = levels.max(1);
        self
    }

    #[inline]
    pub fn color_start(mut self, color: Color) -> Self {
        self.color_start = color;
        self
    }

    #[inline]
    pub fn color_end(mut self, color: Color) -> Self {
        self.color_end = color;
        self
    }

    /// Set both gradient endpoints.
    #[inline]
    pub fn colors(self, start: Color, end: Color) -> Self {
        self.color_start(start).color_end(end)
    }

    #[inline]
    pub fn bloom(mut self, enabled: bool) -> Self {
        self.bloom_enabled = enabled;
        self
    }

    /// Set the bloom blur radius. Negative or NaN values become 0.
    #[inline]
    pub fn bloom_intensity(mut self, intensity: f32) -> Self {
        self.bloom_intensity = non_negative(intensity);
        self
    }

    /// Apply the numeric clamps to values set directly on the public fields.
    pub fn sanitized(self) -> Self {
        let levels = self.levels;
        let strength = self.strength;
        let intensity = self.bloom_intensity;
        self.levels(levels)
            .strength(strength)
            .bloom_intensity(intensity)
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.max(0.0)
    }
}

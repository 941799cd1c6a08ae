//! Loose user input and its resolution into [`PipelineParams`].

use serde::{Deserialize, Serialize};

use super::PipelineParams;
use crate::api::PipelineError;
use crate::color::Color;
use crate::dither::DitherStyle;

/// Parameters as they arrive from a form, query or JSON body.
///
/// Every field is optional; an absent field takes the value from the
/// defaults passed to [`resolve()`](Self::resolve).
///
/// Resolution rules:
///
/// - `style`: case-insensitive name; unknown names are an error
/// - `strength`, `bloom_intensity`: negative or NaN become 0
/// - `levels`: values below 1 become 1
/// - `color_start`, `color_end`: a hex string that does not parse (including
///   an empty one) becomes black, with a warning
/// - `show_original` is a view setting and is not part of the result
///
/// # Example
///
/// ```
/// use tone_dither::{Color, DitherStyle, ParamInput, PipelineParams};
///
/// let input: ParamInput = serde_json::from_str(
///     r##"{"style": "CONTOUR", "levels": 0, "color_end": "#zzz"}"##,
/// ).unwrap();
///
/// let params = input.resolve(&PipelineParams::default()).unwrap();
/// assert_eq!(params.style, DitherStyle::Contour);
/// assert_eq!(params.levels, 1);
/// assert_eq!(params.color_end, Color::BLACK);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamInput {
    pub style: Option<String>,
    pub strength: Option<f32>,
    pub levels: Option<i64>,
    pub color_start: Option<String>,
    pub color_end: Option<String>,
    pub bloom_enabled: Option<bool>,
    pub bloom_intensity: Option<f32>,
    pub show_original: Option<bool>,
}

impl ParamInput {
    /// Resolve into typed parameters, filling absent fields from `defaults`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnsupportedStyle`] if `style` names no known style.
    /// Every other field is clamped or defaulted instead of failing.
    pub fn resolve(&self, defaults: &PipelineParams) -> Result<PipelineParams, PipelineError> {
        let mut params = defaults.sanitized();

        if let Some(style) = self.style.as_deref() {
            params.style = style.parse::<DitherStyle>()?;
        }
        if let Some(strength) = self.strength {
            params = params.strength(strength);
        }
        if let Some(levels) = self.levels {
            params = params.levels(levels.clamp(1, u32::MAX as i64) as u32);
        }
        if let Some(hex) = self.color_start.as_deref() {
            params.color_start = color_or_black("color_start", hex);
        }
        if let Some(hex) = self.color_end.as_deref() {
            params.color_end = color_or_black("color_end", hex);
        }
        if let Some(enabled) = self.bloom_enabled {
            params.bloom_enabled = enabled;
        }
        if let Some(intensity) = self.bloom_intensity {
            params = params.bloom_intensity(intensity);
        }

        Ok(params)
    }
}

/// Parse a hex color, substituting black for anything unparseable.
fn color_or_black(name: &'static str, hex: &str) -> Color {
    match hex.parse::<Color>() {
        Ok(color) => color,
        Err(source) => {
            let err = PipelineError::InvalidParameter {
                name,
                value: hex.to_string(),
                reason: source.to_string(),
            };
            tracing::warn!(%err, "Using black for unparseable color");
            Color::BLACK
        }
    }
}

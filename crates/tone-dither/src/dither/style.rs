//! Dither style selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four dithering styles.
///
/// Parsed case-insensitively from `bayer`, `crosshatch`, `halftone` and
/// `contour`.
///
/// ```
/// use tone_dither::DitherStyle;
///
/// let style: DitherStyle = "Halftone".parse().unwrap();
/// assert_eq!(style, DitherStyle::Halftone);
/// assert!("floyd".parse::<DitherStyle>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DitherStyle {
    /// Bayer ordered dither at 1/4 resolution (4x4 blocks share a threshold).
    #[default]
    Bayer,
    /// Full-resolution ordered dither with a hatching matrix, threshold subtracted.
    Crosshatch,
    /// Dots grown from the center of square cells.
    Halftone,
    /// Horizontal sine bands whose phase follows brightness.
    Contour,
}

impl DitherStyle {
    /// All styles, in menu order.
    pub const ALL: [DitherStyle; 4] = [
        DitherStyle::Bayer,
        DitherStyle::Crosshatch,
        DitherStyle::Halftone,
        DitherStyle::Contour,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DitherStyle::Bayer => "bayer",
            DitherStyle::Crosshatch => "crosshatch",
            DitherStyle::Halftone => "halftone",
            DitherStyle::Contour => "contour",
        }
    }
}

impl fmt::Display for DitherStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a style name is not one of the four known styles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported dither style: {name:?}")]
pub struct ParseStyleError {
    pub name: String,
}

impl FromStr for DitherStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DitherStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStyleError {
                name: s.to_string(),
            })
    }
}

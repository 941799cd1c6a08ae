//! Unified error type for the tone-dither public API.

use thiserror::Error;

use crate::dither::ParseStyleError;
use crate::raster::RasterError;

/// Anything that can stop a pipeline run.
///
/// Out-of-range numeric parameters never end up here; they are clamped
/// (see [`PipelineParams::sanitized()`](crate::PipelineParams::sanitized)).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A parameter value that cannot be used or coerced.
    #[error("invalid parameter {name}={value:?}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The source has no pixels.
    #[error("source image is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    /// The style name matches none of the known styles.
    #[error("unsupported dither style: {0:?}")]
    UnsupportedStyle(String),

    /// Layers handed to compositing differ in size.
    #[error(
        "layer size mismatch: expected {}x{}, got {}x{}",
        .expected.0, .expected.1, .actual.0, .actual.1
    )]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Recomposite was requested before any render of this source.
    #[error("nothing has been rendered for this source yet")]
    NothingRendered,

    #[error(transparent)]
    Raster(#[from] RasterError),
}

impl From<ParseStyleError> for PipelineError {
    fn from(err: ParseStyleError) -> Self {
        PipelineError::UnsupportedStyle(err.name)
    }
}

//! Error type for raster construction.

use thiserror::Error;

/// Returned when a pixel buffer does not describe a `width x height` RGBA image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Buffer length is not `width * height * 4`
    #[error("buffer length {actual} does not match {width}x{height} RGBA (expected {expected})")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// `width * height * 4` does not fit in memory addressing
    #[error("raster dimensions {width}x{height} overflow")]
    Overflow { width: u32, height: u32 },
}

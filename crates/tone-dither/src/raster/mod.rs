//! RGBA raster buffers.
//!
//! [`Raster`] is the only image type the passes exchange: 8 bits per
//! channel, straight (non-premultiplied) alpha, row-major, top-left origin.

mod error;
mod raster;

pub use error::RasterError;
pub use raster::{Fingerprint, Raster, CHANNELS};

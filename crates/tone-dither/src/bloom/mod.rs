//! Bloom pass.
//!
//! Builds a glow layer from the dithered image in two steps:
//!
//! 1. [`extract_highlights()`]: pixels with luma below [`BLOOM_THRESHOLD`]
//!    become fully transparent; brighter pixels are kept as they are.
//! 2. [`gaussian_blur()`]: the sparse highlight layer is blurred on
//!    premultiplied alpha, so glow fades to transparent rather than to black.
//!
//! The result is meant to be added on top of the dithered image by
//! [`composite()`](crate::composite).

mod blur;

pub use blur::{gaussian_blur, gaussian_kernel};

use crate::color::luma;
use crate::raster::{Raster, CHANNELS};

/// Luma at or above which a pixel contributes to bloom.
pub const BLOOM_THRESHOLD: f64 = 180.0;

/// Keep only pixels with luma `>= BLOOM_THRESHOLD`.
///
/// Dark pixels keep their RGB but get alpha 0. Bright pixels are copied
/// unchanged, alpha included.
pub fn extract_highlights(dithered: &Raster) -> Raster {
    let mut mask = dithered.clone();
    for px in mask.as_bytes_mut().chunks_exact_mut(CHANNELS) {
        if luma(px[0], px[1], px[2]) < BLOOM_THRESHOLD {
            px[3] = 0;
        }
    }
    mask
}

/// Build the bloom layer for a dithered raster.
///
/// `intensity` is the blur standard deviation in pixels. `intensity <= 0`
/// (or NaN) skips the blur and returns the highlight mask as is.
///
/// ```
/// use tone_dither::{bloom, Raster};
///
/// let mut dithered = Raster::filled(3, 1, [0, 0, 0, 255]);
/// dithered.set_pixel(1, 0, [255, 255, 255, 255]);
///
/// let layer = bloom(&dithered, 0.0);
/// assert_eq!(layer.pixel(0, 0)[3], 0);
/// assert_eq!(layer.pixel(1, 0), [255, 255, 255, 255]);
/// ```
pub fn bloom(dithered: &Raster, intensity: f32) -> Raster {
    let mask = extract_highlights(dithered);
    if intensity > 0.0 {
        gaussian_blur(&mask, intensity)
    } else {
        mask
    }
}

//! Dithering pass.
//!
//! Maps every source pixel to one of `levels` evenly spaced colors between
//! `color_start` and `color_end`, chosen from the pixel's luma after a
//! style-specific spatial perturbation.
//!
//! # Styles
//!
//! - **Bayer**: 4x4 Bayer matrix, scaled so each cell covers a 4x4 block
//! - **Crosshatch**: hatching matrix at full resolution
//! - **Halftone**: dots grown from cell centers
//! - **Contour**: sine-wave bands following brightness
//!
//! # Architecture
//!
//! Each style implements [`LevelSelector`], which turns `(x, y, gray)` into
//! an unclamped level index. [`dither()`] dispatches once on
//! [`DitherStyle`] and runs a monomorphized loop per style; clamping and
//! color mapping are shared.
//!
//! # Example
//!
//! ```
//! use tone_dither::{dither, Color, DitherStyle, PipelineParams, Raster};
//!
//! let source = Raster::filled(8, 8, [200, 200, 200, 255]);
//! let params = PipelineParams::new()
//!     .style(DitherStyle::Crosshatch)
//!     .levels(2)
//!     .colors(Color::BLACK, Color::WHITE);
//!
//! let out = dither(&source, &params);
//! assert_eq!(out.dimensions(), (8, 8));
//! ```

mod contour;
mod halftone;
mod matrix;
mod ordered;
mod style;

pub use contour::Contour;
pub use halftone::Halftone;
pub use matrix::{DitherMatrix, BAYER, CROSSHATCH};
pub use ordered::{Bayer, Crosshatch, BAYER_SCALE};
pub use style::{DitherStyle, ParseStyleError};

use crate::color::{lerp, luma, Color};
use crate::params::PipelineParams;
use crate::raster::{Raster, CHANNELS};

/// Per-pixel level choice for one dither style.
///
/// Implementors are pure: the same `(x, y, gray)` always yields the same
/// index. The result may fall outside `0..levels`; the caller clamps.
pub trait LevelSelector {
    /// Unclamped level index for the pixel at `(x, y)` whose luma is `gray`
    /// (`0.0..=255.0`).
    fn level(&self, x: u32, y: u32, gray: f64) -> f64;
}

/// Quantization level count and the values derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levels {
    count: u32,
}

impl Levels {
    /// `count` below 1 is raised to 1.
    pub fn new(count: u32) -> Self {
        Self {
            count: count.max(1),
        }
    }

    /// Number of levels as a float.
    #[inline]
    pub fn count(self) -> f64 {
        self.count as f64
    }

    /// Luma distance between adjacent thresholds: `255 / levels`.
    #[inline]
    pub fn step(self) -> f64 {
        255.0 / self.count()
    }

    /// `max(levels - 1, 1)`: the divisor that maps a level index to `0..=1`.
    ///
    /// Never zero, so a single level does not divide by zero.
    #[inline]
    pub fn divisor(self) -> f64 {
        (self.count - 1).max(1) as f64
    }

    /// Highest valid level index, `levels - 1`.
    #[inline]
    pub fn max_index(self) -> f64 {
        (self.count - 1) as f64
    }

    /// Clamp a raw index into range and map it to an interpolation ratio.
    #[inline]
    pub fn ratio(self, index: f64) -> f64 {
        index.clamp(0.0, self.max_index()) / self.divisor()
    }
}

/// Round half up (towards positive infinity), e.g. `0.5 -> 1`, `-0.5 -> 0`.
#[inline]
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Dither `source` into a two-color gradient with `params.levels` steps.
///
/// Returns a raster of the same dimensions. RGB comes from
/// `lerp(color_start, color_end, level / (levels - 1))`; alpha is copied
/// from the source untouched.
pub fn dither(source: &Raster, params: &PipelineParams) -> Raster {
    let levels = Levels::new(params.levels);
    let strength = params.strength as f64;

    match params.style {
        DitherStyle::Bayer => quantize(source, params, &Bayer::new(levels, strength)),
        DitherStyle::Crosshatch => quantize(source, params, &Crosshatch::new(levels, strength)),
        DitherStyle::Halftone => quantize(source, params, &Halftone::new(levels, strength)),
        DitherStyle::Contour => quantize(source, params, &Contour::new(levels, strength)),
    }
}

fn quantize<S: LevelSelector>(source: &Raster, params: &PipelineParams, selector: &S) -> Raster {
    let levels = Levels::new(params.levels);
    let (start, end) = (params.color_start, params.color_end);
    let width = source.width().max(1) as usize;

    let mut output = source.clone();
    for (i, px) in output
        .as_bytes_mut()
        .chunks_exact_mut(CHANNELS)
        .enumerate()
    {
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        let gray = luma(px[0], px[1], px[2]);

        let ratio = levels.ratio(selector.level(x, y, gray));
        let Color { r, g, b } = lerp(start, end, ratio);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gradient(width: u32, height: u32) -> Raster {
        let mut raster = Raster::filled(width, height, [0, 0, 0, 255]);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y * width) * 255 / (width * height - 1)) as u8;
                raster.set_pixel(x, y, [v, v, v, (x * 40) as u8]);
            }
        }
        raster
    }

    #[test]
    fn test_levels_derived_values() {
        let four = Levels::new(4);
        assert_eq!(four.count(), 4.0);
        assert_eq!(four.step(), 63.75);
        assert_eq!(four.divisor(), 3.0);
        assert_eq!(four.max_index(), 3.0);

        let one = Levels::new(1);
        assert_eq!(one.divisor(), 1.0);
        assert_eq!(one.max_index(), 0.0);

        assert_eq!(Levels::new(0), Levels::new(1));
    }

    #[test]
    fn test_ratio_clamps() {
        let levels = Levels::new(3);
        assert_eq!(levels.ratio(-2.0), 0.0);
        assert_eq!(levels.ratio(1.0), 0.5);
        assert_eq!(levels.ratio(7.0), 1.0);

        // One level: everything maps to the start color
        assert_eq!(Levels::new(1).ratio(1.0), 0.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(1.49), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.51), -1.0);
    }

    #[test]
    fn test_dither_preserves_dimensions_and_alpha() {
        let source = gradient(7, 5);
        for style in DitherStyle::ALL {
            let params = PipelineParams::new().style(style).levels(3);
            let out = dither(&source, &params);
            assert_eq!(out.dimensions(), source.dimensions());
            for ((_, _, a), (_, _, b)) in source.pixels().zip(out.pixels()) {
                assert_eq!(a[3], b[3], "{style} changed alpha");
            }
        }
    }

    #[test]
    fn test_dither_outputs_only_gradient_colors() {
        let source = gradient(16, 16);
        let start = Color::new(10, 40, 200);
        let end = Color::new(250, 200, 0);
        let levels = 4u32;
        let allowed: Vec<[u8; 3]> = (0..levels)
            .map(|i| lerp(start, end, i as f64 / 3.0).to_bytes())
            .collect();

        for style in DitherStyle::ALL {
            let params = PipelineParams::new()
                .style(style)
                .levels(levels)
                .colors(start, end);
            let out = dither(&source, &params);
            for (x, y, px) in out.pixels() {
                assert!(
                    allowed.contains(&[px[0], px[1], px[2]]),
                    "{style}: pixel ({x}, {y}) = {px:?} is not a gradient level"
                );
            }
        }
    }

    #[test]
    fn test_dither_is_deterministic() {
        let source = gradient(9, 9);
        let params = PipelineParams::new().style(DitherStyle::Halftone).strength(1.7);
        assert_eq!(dither(&source, &params), dither(&source, &params));
    }

    #[test]
    fn test_source_is_not_modified() {
        let source = gradient(4, 4);
        let before = source.clone();
        let _ = dither(&source, &PipelineParams::new());
        assert_eq!(source, before);
    }
}

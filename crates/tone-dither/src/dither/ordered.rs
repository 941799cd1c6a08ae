//! Matrix-based ordered dithering: Bayer and crosshatch.
//!
//! Both styles perturb the pixel's luma by a matrix threshold scaled to one
//! quantization step, then round to the nearest level. They differ in two
//! deliberate ways that give them distinct textures:
//!
//! | | Bayer | Crosshatch |
//! |---|---|---|
//! | Matrix lookup | `(y/4, x/4)`, each cell covers 4x4 pixels | `(y, x)`, one cell per pixel |
//! | Perturbation | `gray + threshold * strength` | `gray - threshold * strength` |

use super::matrix::{BAYER, CROSSHATCH};
use super::{round_half_up, LevelSelector, Levels};

/// Pixels per Bayer matrix cell along each axis.
pub const BAYER_SCALE: u32 = 4;

/// Coarse Bayer dither: one matrix cell per 4x4 pixel block.
#[derive(Debug, Clone, Copy)]
pub struct Bayer {
    levels: Levels,
    strength: f64,
}

impl Bayer {
    pub fn new(levels: Levels, strength: f64) -> Self {
        Self { levels, strength }
    }
}

impl LevelSelector for Bayer {
    #[inline]
    fn level(&self, x: u32, y: u32, gray: f64) -> f64 {
        let sx = x / BAYER_SCALE;
        let sy = y / BAYER_SCALE;
        let threshold = BAYER.centered(sy, sx) * self.levels.step();
        let dithered = gray + threshold * self.strength;
        round_half_up(dithered / 255.0 * self.levels.divisor())
    }
}

/// Full-resolution crosshatch dither with a subtracted threshold.
#[derive(Debug, Clone, Copy)]
pub struct Crosshatch {
    levels: Levels,
    strength: f64,
}

impl Crosshatch {
    pub fn new(levels: Levels, strength: f64) -> Self {
        Self { levels, strength }
    }
}

impl LevelSelector for Crosshatch {
    #[inline]
    fn level(&self, x: u32, y: u32, gray: f64) -> f64 {
        let threshold = CROSSHATCH.centered(y, x) * self.levels.step();
        let dithered = gray - threshold * self.strength;
        round_half_up(dithered / 255.0 * self.levels.divisor())
    }
}

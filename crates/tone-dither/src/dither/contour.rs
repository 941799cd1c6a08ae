//! Contour bands.
//!
//! Adds a vertical sine wave to the luma before posterizing. The wave's
//! phase depends on the luma itself, so level boundaries bend into wavy
//! contour lines that follow the image's tonal structure.

use super::{round_half_up, LevelSelector, Levels};

/// Spatial frequency (radians per row) at strength 1.0.
pub const BASE_FREQUENCY: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct Contour {
    levels: Levels,
    frequency: f64,
}

impl Contour {
    pub fn new(levels: Levels, strength: f64) -> Self {
        Self {
            levels,
            frequency: BASE_FREQUENCY * strength,
        }
    }
}

impl LevelSelector for Contour {
    #[inline]
    fn level(&self, _x: u32, y: u32, gray: f64) -> f64 {
        let step = self.levels.step();
        let wave = (y as f64 * self.frequency + gray / (step * 1.5)).sin() * (step / 2.0);
        round_half_up((gray + wave) / 255.0 * self.levels.divisor())
    }
}

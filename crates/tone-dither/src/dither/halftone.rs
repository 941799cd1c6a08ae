//! Halftone dots.
//!
//! The image is cut into square cells of side `10 / strength` pixels. Within
//! each cell, pixels inside a centered disc take the next level up; the disc
//! radius grows with how far the luma sits between two levels. Higher
//! strength means smaller cells.

use super::{LevelSelector, Levels};

/// Base cell size in pixels at strength 1.0.
pub const BASE_CELL_SIZE: f64 = 10.0;

/// Strength used in place of zero, which would make the cell infinite.
pub const MIN_STRENGTH: f64 = 0.01;

/// Maximum dot radius as a fraction of half the cell.
pub const DOT_FILL: f64 = 0.8;

#[derive(Debug, Clone, Copy)]
pub struct Halftone {
    levels: Levels,
    cell_size: f64,
    half_cell: f64,
}

impl Halftone {
    pub fn new(levels: Levels, strength: f64) -> Self {
        let safe_strength = if strength > 0.0 { strength } else { MIN_STRENGTH };
        let cell_size = BASE_CELL_SIZE / safe_strength;
        Self {
            levels,
            cell_size,
            half_cell: cell_size / 2.0,
        }
    }

    /// Side length of one dot cell in pixels (may be fractional).
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

impl LevelSelector for Halftone {
    #[inline]
    fn level(&self, x: u32, y: u32, gray: f64) -> f64 {
        let scaled = gray / 256.0 * self.levels.count();
        let base = scaled.floor();
        let next_level_ratio = scaled - base;

        let dx = x as f64 % self.cell_size - self.half_cell;
        let dy = y as f64 % self.cell_size - self.half_cell;
        let dist = dx.hypot(dy);
        let radius = next_level_ratio * self.half_cell * DOT_FILL;

        if dist > radius {
            base
        } else {
            base + 1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_strength_uses_minimum() {
        let halftone = Halftone::new(Levels::new(4), 0.0);
        assert_eq!(halftone.cell_size(), 1000.0);

        let negative = Halftone::new(Levels::new(4), -1.0);
        assert_eq!(negative.cell_size(), 1000.0);
    }

    #[test]
    fn test_cell_size_shrinks_with_strength() {
        assert_eq!(Halftone::new(Levels::new(4), 1.0).cell_size(), 10.0);
        assert_eq!(Halftone::new(Levels::new(4), 2.0).cell_size(), 5.0);
    }

    #[test]
    fn test_dot_center_rises_edge_stays() {
        // levels 2, gray 192: scaled = 1.5 -> base 1, ratio 0.5, radius = 0.5*5*0.8 = 2
        let halftone = Halftone::new(Levels::new(2), 1.0);
        assert_eq!(halftone.level(5, 5, 192.0), 2.0, "cell center is inside the dot");
        assert_eq!(halftone.level(0, 0, 192.0), 1.0, "cell corner is outside the dot");
        // Next cell repeats the pattern
        assert_eq!(halftone.level(15, 15, 192.0), 2.0);
    }

    #[test]
    fn test_zero_ratio_dot_is_center_pixel_only() {
        // gray 128, levels 2: scaled = 1.0 -> ratio 0, radius 0; center distance 0 is not > 0
        let halftone = Halftone::new(Levels::new(2), 1.0);
        assert_eq!(halftone.level(5, 5, 128.0), 2.0);
        assert_eq!(halftone.level(6, 5, 128.0), 1.0);
    }

    #[test]
    fn test_black_stays_at_zero_off_center() {
        let halftone = Halftone::new(Levels::new(4), 1.0);
        assert_eq!(halftone.level(0, 0, 0.0), 0.0);
    }
}

//! The two 4x4 ordered-dither threshold matrices.

/// A 4x4 threshold matrix with entries in `0..=15`.
///
/// Indexed as `matrix.get(row, col)`; both indices wrap modulo 4, so callers
/// can pass raw (or scaled) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherMatrix {
    cells: [[u8; 4]; 4],
}

impl DitherMatrix {
    /// Side length of the matrix.
    pub const SIZE: u32 = 4;

    /// Number of distinct threshold values (the normalizing divisor).
    pub const LEVELS: f64 = 16.0;

    pub const fn new(cells: [[u8; 4]; 4]) -> Self {
        Self { cells }
    }

    /// Threshold at `(row mod 4, col mod 4)`.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> u8 {
        self.cells[(row % Self::SIZE) as usize][(col % Self::SIZE) as usize]
    }

    /// Threshold mapped to `-0.5..0.5`: `t / 16 - 0.5`.
    #[inline]
    pub fn centered(&self, row: u32, col: u32) -> f64 {
        self.get(row, col) as f64 / Self::LEVELS - 0.5
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[[u8; 4]; 4] {
        &self.cells
    }
}

/// Classic recursive Bayer matrix.
pub static BAYER: DitherMatrix = DitherMatrix::new([
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
]);

/// Diagonal-stroke matrix that yields a hatched texture.
pub static CROSSHATCH: DitherMatrix = DitherMatrix::new([
    [12, 5, 6, 13],
    [4, 11, 10, 7],
    [8, 9, 3, 0],
    [1, 2, 15, 14],
]);

//! The [`Raster`] buffer type.

use std::fmt;

use sha2::{Digest, Sha256};

use super::RasterError;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An 8-bit RGBA image.
///
/// Invariant: `data.len() == width * height * 4`. Every constructor checks
/// it, and no method can change the dimensions of an existing raster.
///
/// Zero-sized rasters are representable (an empty buffer is a valid
/// `0 x N` image); the pipeline rejects them as input.
///
/// # Example
///
/// ```
/// use tone_dither::Raster;
///
/// let raster = Raster::filled(2, 1, [255, 0, 0, 255]);
/// assert_eq!(raster.pixel(1, 0), [255, 0, 0, 255]);
/// assert_eq!(raster.as_bytes().len(), 2 * 1 * 4);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    ///
    /// [`RasterError::LengthMismatch`] if `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a raster with every pixel set to `rgba`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let data = rgba.repeat(pixels);
        Self {
            width,
            height,
            data,
        }
    }

    /// Build a raster from an RGB buffer, giving every pixel full opacity.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self, RasterError> {
        let expected = byte_len(width, height)? / CHANNELS * 3;
        if rgb.len() != expected {
            return Err(RasterError::LengthMismatch {
                width,
                height,
                expected,
                actual: rgb.len(),
            });
        }
        let mut data = Vec::with_capacity(expected / 3 * CHANNELS);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Self::new(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes. The length cannot change through a slice.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its RGBA bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate over `(x, y, [r, g, b, a])` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        let width = self.width.max(1);
        self.data
            .chunks_exact(CHANNELS)
            .enumerate()
            .map(move |(i, px)| {
                let x = (i as u32) % width;
                let y = (i as u32) / width;
                (x, y, [px[0], px[1], px[2], px[3]])
            })
    }

    /// Content hash of dimensions and pixels.
    ///
    /// Two rasters have the same fingerprint exactly when they have the same
    /// size and bytes (up to SHA-256 collisions).
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.data);
        Fingerprint(hasher.finalize().into())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} raster",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, RasterError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(RasterError::Overflow { width, height })
}

/// SHA-256 digest identifying a raster's content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Lowercase hex representation (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough for logs
        f.write_str(&hex::encode(&self.0[..8]))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

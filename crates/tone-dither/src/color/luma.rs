//! Luma (perceived brightness) of device RGB values.

/// Red weight of the ITU-R BT.601 luma formula.
pub const LUMA_R: f64 = 0.299;
/// Green weight of the ITU-R BT.601 luma formula.
pub const LUMA_G: f64 = 0.587;
/// Blue weight of the ITU-R BT.601 luma formula.
pub const LUMA_B: f64 = 0.114;

/// Luma of an 8-bit RGB triple, in the range `0.0..=255.0`.
///
/// No gamma handling: channels are weighted as stored.
///
/// ```
/// use tone_dither::luma;
///
/// assert_eq!(luma(0, 0, 0), 0.0);
/// assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

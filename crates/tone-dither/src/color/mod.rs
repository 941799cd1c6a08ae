//! Color types and numeric helpers.
//!
//! Everything here is pure: no state, no allocation.
//!
//! - [`Color`]: an opaque 8-bit RGB triple
//! - [`lerp`]: linear interpolation between two colors
//! - [`luma`]: ITU-R BT.601 luma of an 8-bit RGB triple
//!
//! # Example
//!
//! ```
//! use tone_dither::{lerp, Color};
//!
//! let start: Color = "#000000".parse().unwrap();
//! let end: Color = "#FF8000".parse().unwrap();
//!
//! assert_eq!(lerp(start, end, 0.0), start);
//! assert_eq!(lerp(start, end, 1.0), end);
//! ```

mod error;
mod luma;
mod rgb;

pub use error::ParseColorError;
pub use luma::{luma, LUMA_B, LUMA_G, LUMA_R};
pub use rgb::{lerp, Color};

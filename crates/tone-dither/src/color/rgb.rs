//! Opaque 8-bit RGB color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseColorError;

/// An opaque color with 8-bit channels.
///
/// Used for the two endpoints of the dither gradient. Never carries alpha:
/// alpha always comes from the source raster.
///
/// Serializes as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB` and `RRGGBB`, case-insensitive. Surrounding
    /// whitespace is trimmed. The 3-digit shorthand is rejected.
    ///
    /// ```
    /// use tone_dither::Color;
    ///
    /// let orange: Color = "#ff8000".parse().unwrap();
    /// assert_eq!(orange, Color::new(255, 128, 0));
    ///
    /// let white: Color = "FFFFFF".parse().unwrap();
    /// assert_eq!(white, Color::WHITE);
    ///
    /// assert!("#fff".parse::<Color>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(bad));
        }

        // All characters are ASCII hex digits from here on
        let digit = |i: usize| (s.as_bytes()[i] as char).to_digit(16).unwrap_or(0) as u8;

        if s.len() != 6 {
            return Err(ParseColorError::InvalidLength);
        }
        Ok(Self::new(
            (digit(0) << 4) | digit(1),
            (digit(2) << 4) | digit(3),
            (digit(4) << 4) | digit(5),
        ))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Linearly interpolate between two colors.
///
/// `amount` is expected in `0.0..=1.0`; each channel is rounded to the
/// nearest byte (ties to even, like an 8-bit canvas store) and clamped. The endpoints are exact:
/// `lerp(a, b, 0.0) == a` and `lerp(a, b, 1.0) == b`.
#[inline]
pub fn lerp(a: Color, b: Color, amount: f64) -> Color {
    #[inline]
    fn channel(a: u8, b: u8, amount: f64) -> u8 {
        let a = a as f64;
        let v = a + amount * (b as f64 - a);
        v.round_ties_even().clamp(0.0, 255.0) as u8
    }

    Color {
        r: channel(a.r, b.r, amount),
        g: channel(a.g, b.g, amount),
        b: channel(a.b, b.b, amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_6digit() {
        let c: Color = "#1A2b3C".parse().unwrap();
        assert_eq!(c, Color::new(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_without_hash() {
        let c: Color = "00ff00".parse().unwrap();
        assert_eq!(c, Color::new(0, 255, 0));
    }

    #[test]
    fn test_parse_rejects_shorthand() {
        assert_eq!("#F0a".parse::<Color>(), Err(ParseColorError::InvalidLength));
        assert_eq!("fff".parse::<Color>(), Err(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let c: Color = "  #ffffff \n".parse().unwrap();
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn test_parse_invalid_length() {
        assert_eq!(
            "#12345".parse::<Color>(),
            Err(ParseColorError::InvalidLength)
        );
        assert_eq!("".parse::<Color>(), Err(ParseColorError::InvalidLength));
    }

    #[test]
    fn test_parse_invalid_digit() {
        assert_eq!(
            "#gg0000".parse::<Color>(),
            Err(ParseColorError::InvalidDigit('g'))
        );
        assert_eq!(
            "+12345".parse::<Color>(),
            Err(ParseColorError::InvalidDigit('+'))
        );
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(Color::new(255, 128, 0).to_hex(), "#ff8000");
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let pairs = [
            (Color::BLACK, Color::WHITE),
            (Color::new(13, 200, 77), Color::new(250, 3, 128)),
            (Color::new(255, 255, 255), Color::new(0, 0, 0)),
            (Color::new(1, 2, 3), Color::new(1, 2, 3)),
        ];
        for (a, b) in pairs {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
    }

    #[test]
    fn test_lerp_midpoint_rounds() {
        let mid = lerp(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!(mid, Color::new(128, 128, 128));

        let third = lerp(Color::BLACK, Color::new(255, 30, 0), 1.0 / 3.0);
        assert_eq!(third, Color::new(85, 10, 0));
    }

    #[test]
    fn test_lerp_ties_round_to_even() {
        assert_eq!(lerp(Color::BLACK, Color::new(1, 1, 1), 0.5), Color::BLACK);
        assert_eq!(
            lerp(Color::BLACK, Color::new(3, 5, 7), 0.5),
            Color::new(2, 2, 4),
            "1.5 -> 2, 2.5 -> 2, 3.5 -> 4"
        );
    }

    #[test]
    fn test_serde_hex_string() {
        let json = serde_json::to_string(&Color::new(0, 128, 255)).unwrap();
        assert_eq!(json, "\"#0080ff\"");

        let back: Color = serde_json::from_str("\"#0080FF\"").unwrap();
        assert_eq!(back, Color::new(0, 128, 255));

        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}

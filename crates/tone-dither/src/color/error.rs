//! Error type for hex color parsing.

use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 6 characters after stripping '#')
    #[error("invalid hex color length (expected 6 characters)")]
    InvalidLength,
    /// Non-hexadecimal character encountered
    #[error("invalid hex character: {0:?}")]
    InvalidDigit(char),
}

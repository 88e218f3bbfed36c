//! Error types for the Suijin drivers and configuration.
//!
//! The watering core is total and never fails; these types cover the RTC and
//! LCD drivers and the config loader.  All variants are `Copy` so adapters
//! can log them and carry on with the last good value.  Bootstrap in
//! `main.rs` goes through `anyhow`.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// RTC errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcError {
    /// I²C transaction failed.
    Bus(ErrorKind),
    /// Register contents are not a valid BCD time/date.
    InvalidData,
}

impl fmt::Display for RtcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "I2C bus error ({kind})"),
            Self::InvalidData => write!(f, "invalid register data"),
        }
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// I²C write to the port expander failed.
    Bus(ErrorKind),
    /// Cursor position outside the visible area.
    OutOfBounds,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "I2C bus error ({kind})"),
            Self::OutOfBounds => write!(f, "cursor out of bounds"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for [`WateringConfig`](crate::config::WateringConfig).
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config document"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

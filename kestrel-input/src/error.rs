//! Errors raised while configuring the input layer.
//!
//! Queries never fail; they return neutral values instead. Only setup and
//! display-configuration changes can be rejected.

use thiserror::Error;

/// Error returned when input configuration is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    /// The scale factor is zero, negative, or not finite.
    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScaleFactor(f64),
    /// The screen offset is not finite.
    #[error("screen offset must be finite, got ({x}, {y})")]
    InvalidOffset {
        /// Horizontal offset in device pixels.
        x: f64,
        /// Vertical offset in device pixels.
        y: f64,
    },
    /// The text buffer limit is zero.
    #[error("text buffer limit must be at least one character")]
    ZeroTextBufferLimit,
}

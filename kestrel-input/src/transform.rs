//! # Coordinate Adjustment
//!
//! Device layers report positions in device (physical) pixels. Game logic
//! works in logical coordinates, which differ by the display scale factor and
//! an optional offset of the drawing area inside the window.
//!
//! The input layer stores positions device-native and applies the
//! [`ScreenTransform`] only when a position is read. Changing the scale factor
//! therefore takes effect on the next query, without waiting for a poll.
//!
//! ```
//! use kestrel_input::ScreenTransform;
//!
//! let transform = ScreenTransform::new(2.0, 0.0, 0.0).expect("valid transform");
//! assert_eq!(transform.adjust(100.0, 50.0), (50, 25));
//! ```

use crate::error::InputError;

/// Linear mapping from device pixels to logical coordinates.
///
/// `logical = trunc((device - offset) / scale)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ScreenTransform {
    /// Scale factor `1.0`, no offset.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Creates a transform, validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidScaleFactor`] if `scale` is not finite and
    /// positive, and [`InputError::InvalidOffset`] if either offset is not
    /// finite.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Result<Self, InputError> {
        Self::IDENTITY
            .with_scale(scale)?
            .with_offset(offset_x, offset_y)
    }

    /// Returns a copy with a different scale factor.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidScaleFactor`] if `scale` is not finite and
    /// positive.
    pub fn with_scale(self, scale: f64) -> Result<Self, InputError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(InputError::InvalidScaleFactor(scale));
        }
        Ok(Self { scale, ..self })
    }

    /// Returns a copy with a different offset, in device pixels.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidOffset`] if either component is not finite.
    pub fn with_offset(self, offset_x: f64, offset_y: f64) -> Result<Self, InputError> {
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return Err(InputError::InvalidOffset {
                x: offset_x,
                y: offset_y,
            });
        }
        Ok(Self {
            offset_x,
            offset_y,
            ..self
        })
    }

    /// The scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The offset `(x, y)` in device pixels.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Maps a device position to logical coordinates, rounding toward zero.
    ///
    /// Results outside the `i32` range saturate.
    pub fn adjust(&self, x: f64, y: f64) -> (i32, i32) {
        let lx = ((x - self.offset_x) / self.scale).trunc();
        let ly = ((y - self.offset_y) / self.scale).trunc();
        // Float-to-int `as` saturates.
        (lx as i32, ly as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_coordinates() {
        assert_eq!(ScreenTransform::IDENTITY.adjust(12.0, -7.0), (12, -7));
        assert_eq!(ScreenTransform::default(), ScreenTransform::IDENTITY);
    }

    #[test]
    fn scale_divides_and_truncates() {
        let transform = ScreenTransform::new(2.0, 0.0, 0.0).expect("valid transform");
        assert_eq!(transform.adjust(100.0, 50.0), (50, 25));
        assert_eq!(transform.adjust(101.0, 51.0), (50, 25));
        assert_eq!(transform.adjust(-3.0, -1.0), (-1, 0));
    }

    #[test]
    fn offset_is_applied_before_scale() {
        let transform = ScreenTransform::new(2.0, 10.0, 20.0).expect("valid transform");
        assert_eq!(transform.adjust(110.0, 60.0), (50, 20));
        assert_eq!(transform.offset(), (10.0, 20.0));
    }

    #[test]
    fn large_values_saturate() {
        let transform = ScreenTransform::new(1e-300, 0.0, 0.0).expect("valid transform");
        assert_eq!(transform.adjust(1.0, -1.0), (i32::MAX, i32::MIN));
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            ScreenTransform::new(0.0, 0.0, 0.0),
            Err(InputError::InvalidScaleFactor(0.0))
        );
        assert!(ScreenTransform::new(-1.5, 0.0, 0.0).is_err());
        assert!(ScreenTransform::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(ScreenTransform::new(f64::INFINITY, 0.0, 0.0).is_err());
        assert!(matches!(
            ScreenTransform::new(1.0, f64::NAN, 0.0),
            Err(InputError::InvalidOffset { .. })
        ));
    }
}

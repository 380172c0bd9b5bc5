//! Input layer configuration.

/// Default limit on characters buffered within one frame.
pub const DEFAULT_TEXT_BUFFER_LIMIT: usize = 1024;

/// Configuration for an [`Input`](crate::Input) instance.
///
/// # Examples
///
/// ```
/// use kestrel_input::{Input, InputConfig};
///
/// let input = Input::with_config(InputConfig {
///     initial_scale_factor: 2.0,
///     ..Default::default()
/// })
/// .expect("valid config");
/// assert_eq!(input.screen_transform().scale(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Scale factor used by queries until the first poll supplies one.
    ///
    /// Must be finite and positive. Defaults to `1.0`.
    pub initial_scale_factor: f64,
    /// Offset of the logical origin inside the window, in device pixels.
    ///
    /// Defaults to `(0.0, 0.0)`.
    pub screen_offset: (f64, f64),
    /// Maximum characters kept in the text buffer between two frame
    /// boundaries. Characters past the limit are dropped.
    ///
    /// The buffer is allocated up front at this size. Defaults to
    /// [`DEFAULT_TEXT_BUFFER_LIMIT`].
    pub text_buffer_limit: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            initial_scale_factor: 1.0,
            screen_offset: (0.0, 0.0),
            text_buffer_limit: DEFAULT_TEXT_BUFFER_LIMIT,
        }
    }
}

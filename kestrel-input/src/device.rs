//! # Device Layer Contract
//!
//! The input layer does not talk to the operating system itself. Instead it
//! reads from a [`DeviceLayer`], the native device-query surface owned by the
//! windowing backend, and treats it as authoritative.
//!
//! A device layer provides two kinds of access:
//!
//! - **Instantaneous state** (keys, mouse buttons, cursor, gamepads, touches),
//!   read once per frame by [`Input::poll`](crate::Input::poll).
//! - **Push callbacks** for discrete events (characters, scroll) that arrive at
//!   arbitrary times, possibly on other threads. The input layer registers
//!   them exactly once, on the first poll.
//!
//! ## Lock Ordering
//!
//! Callbacks take the input layer's write lock. Implementations must therefore
//! release their own internal locks before invoking a callback, and must never
//! invoke a callback from inside [`DeviceLayer::set_char_callback`] or
//! [`DeviceLayer::set_scroll_callback`], which run while the input layer holds
//! that lock.

use std::sync::Arc;

use crate::key::{Key, MouseButton};

/// Identifier of an active touch point, as assigned by the device layer.
pub type TouchId = u64;

/// Callback receiving one character of text input.
pub type CharCallback = Arc<dyn Fn(char) + Send + Sync + 'static>;

/// Callback receiving the scroll delta `(x, y)` for the current gesture tick.
pub type ScrollCallback = Arc<dyn Fn(f64, f64) + Send + Sync + 'static>;

/// A borrowed view of one gamepad's state, as reported by the device layer.
///
/// Slices may be any length; the input layer clips them to its fixed
/// capacities.
#[derive(Debug, Clone, Copy)]
pub struct GamepadReading<'a> {
    /// Stable hardware identifier (typically an SDL-compatible GUID string).
    pub guid: &'a str,
    /// Human-readable device name.
    pub name: &'a str,
    /// Axis values, usually in `-1.0..=1.0`.
    pub axes: &'a [f32],
    /// Button states, `true` while pressed.
    pub buttons: &'a [bool],
}

/// The native device-query surface consumed by [`Input`](crate::Input).
pub trait DeviceLayer {
    /// Returns true while `key` is physically held.
    fn is_key_down(&self, key: Key) -> bool;

    /// Returns true while `button` is physically held.
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Returns the cursor position in device pixels.
    fn cursor_position(&self) -> (f64, f64);

    /// Reports the gamepad at `slot`.
    ///
    /// Implementations call `visit` exactly once if a device is present at
    /// `slot`, and not at all otherwise.
    fn read_gamepad(&self, slot: usize, visit: &mut dyn FnMut(GamepadReading<'_>));

    /// Reports every active touch point as `(id, x, y)` in device pixels.
    ///
    /// The default implementation reports none, for device layers without
    /// touch support.
    fn read_touches(&self, _visit: &mut dyn FnMut(TouchId, f64, f64)) {}

    /// Installs the character input callback, replacing any previous one.
    fn set_char_callback(&self, callback: CharCallback);

    /// Installs the scroll callback, replacing any previous one.
    fn set_scroll_callback(&self, callback: ScrollCallback);
}

impl<D: DeviceLayer + ?Sized> DeviceLayer for Arc<D> {
    fn is_key_down(&self, key: Key) -> bool {
        (**self).is_key_down(key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        (**self).is_mouse_button_down(button)
    }

    fn cursor_position(&self) -> (f64, f64) {
        (**self).cursor_position()
    }

    fn read_gamepad(&self, slot: usize, visit: &mut dyn FnMut(GamepadReading<'_>)) {
        (**self).read_gamepad(slot, visit)
    }

    fn read_touches(&self, visit: &mut dyn FnMut(TouchId, f64, f64)) {
        (**self).read_touches(visit)
    }

    fn set_char_callback(&self, callback: CharCallback) {
        (**self).set_char_callback(callback)
    }

    fn set_scroll_callback(&self, callback: ScrollCallback) {
        (**self).set_scroll_callback(callback)
    }
}

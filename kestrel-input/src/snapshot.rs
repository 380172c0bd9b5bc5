//! Owned copies of the input state for multi-field reads.

use crate::{
    device::TouchId,
    gamepad::GamepadState,
    key::{Key, Modifiers, MouseButton},
};

/// A copy of the whole input state taken under a single read lock.
///
/// Individual [`Input`](crate::Input) queries are each consistent on their
/// own, but two queries may straddle a poll. Take a snapshot when several
/// fields must come from the same poll. Positions are already adjusted to
/// logical coordinates.
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    pub(crate) key_held: [bool; Key::COUNT],
    pub(crate) mouse_button_held: [bool; MouseButton::COUNT],
    pub(crate) cursor: (i32, i32),
    pub(crate) wheel: (f64, f64),
    pub(crate) text: String,
    pub(crate) gamepads: Vec<(usize, GamepadState)>,
    pub(crate) touches: Vec<(TouchId, (i32, i32))>,
}

impl InputSnapshot {
    /// Returns true if `key` was held.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.key_held[key.index()]
    }

    /// Returns true if `button` was held.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_button_held[button.index()]
    }

    /// Modifier keys that were held.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_held(&self.key_held)
    }

    /// Cursor position in logical coordinates.
    pub fn cursor_position(&self) -> (i32, i32) {
        self.cursor
    }

    /// Scroll delta of the frame.
    pub fn wheel(&self) -> (f64, f64) {
        self.wheel
    }

    /// Text entered during the frame.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sorted ids of connected gamepads.
    pub fn gamepad_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.gamepads.iter().map(|(id, _)| *id)
    }

    /// The gamepad at `id`, if it was connected.
    pub fn gamepad(&self, id: usize) -> Option<&GamepadState> {
        self.gamepads
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, gamepad)| gamepad)
    }

    /// Active touches with logical positions, sorted by id.
    pub fn touches(&self) -> &[(TouchId, (i32, i32))] {
        &self.touches
    }
}

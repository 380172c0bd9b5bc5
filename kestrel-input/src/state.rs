//! # Device Snapshot Store
//!
//! [`InputState`] is the aggregate behind the input lock. It is fixed-shape:
//! keys, mouse buttons and gamepads are pre-sized arrays that are rewritten in
//! place on every poll. The touch table is sparse and the text buffer is
//! allocated once, up to its configured limit.
//!
//! State falls into two groups:
//!
//! - **Persistent**: held keys and buttons, cursor, gamepads, touches. Rebuilt
//!   from the device layer on every poll, untouched by the frame boundary.
//! - **Transient**: text and scroll. Written by push callbacks and cleared
//!   exactly once per frame by [`InputState::clear_transients`].

use std::collections::BTreeMap;

use tracing::{trace, warn};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::{
    device::{DeviceLayer, GamepadReading, TouchId},
    gamepad::{GamepadState, MAX_GAMEPADS},
    key::{Key, MouseButton},
    transform::ScreenTransform,
};

/// Raw touch position in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TouchPosition {
    pub x: i32,
    pub y: i32,
}

pub(crate) struct InputState {
    pub key_held: [bool; Key::COUNT],
    pub mouse_button_held: [bool; MouseButton::COUNT],
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub gamepads: [GamepadState; MAX_GAMEPADS],
    pub touches: BTreeMap<TouchId, TouchPosition>,
    /// Lives under the same guard as the positions it adjusts.
    pub transform: ScreenTransform,
    pub text: Vec<char>,
    text_limit: usize,
    /// Set once the text limit dropped a character this frame.
    text_overflowed: bool,
    pub callbacks_registered: bool,
}

impl InputState {
    pub fn new(text_limit: usize, transform: ScreenTransform) -> Self {
        Self {
            key_held: [false; Key::COUNT],
            mouse_button_held: [false; MouseButton::COUNT],
            scroll_x: 0.0,
            scroll_y: 0.0,
            cursor_x: 0,
            cursor_y: 0,
            gamepads: Default::default(),
            touches: BTreeMap::new(),
            transform,
            text: Vec::with_capacity(text_limit),
            text_limit,
            text_overflowed: false,
            callbacks_registered: false,
        }
    }

    /// Rebuilds all persistent state from the device layer.
    pub fn refresh<D: DeviceLayer + ?Sized>(&mut self, device: &D) {
        for &key in Key::ALL {
            self.key_held[key.index()] = device.is_key_down(key);
        }
        for &button in MouseButton::ALL {
            self.mouse_button_held[button.index()] = device.is_mouse_button_down(button);
        }

        let (x, y) = device.cursor_position();
        self.cursor_x = x as i32;
        self.cursor_y = y as i32;

        for (slot, gamepad) in self.gamepads.iter_mut().enumerate() {
            let mut present = false;
            device.read_gamepad(slot, &mut |reading: GamepadReading<'_>| {
                present = true;
                gamepad.load(slot, reading);
            });
            if !present {
                gamepad.disconnect(slot);
            }
        }

        self.touches.clear();
        let touches = &mut self.touches;
        device.read_touches(&mut |id: TouchId, x: f64, y: f64| {
            touches.insert(
                id,
                TouchPosition {
                    x: x as i32,
                    y: y as i32,
                },
            );
        });
    }

    /// Appends a printable character to the text buffer.
    pub fn push_char(&mut self, ch: char) {
        if self.text.len() >= self.text_limit {
            if !self.text_overflowed {
                warn!(
                    "Text buffer limit of {} characters reached, dropping input until the next frame",
                    self.text_limit
                );
                self.text_overflowed = true;
            }
            return;
        }
        trace!("Character input: {ch:?}");
        self.text.push(ch);
    }

    /// Replaces the scroll delta with the one the device accumulated.
    pub fn set_wheel(&mut self, x: f64, y: f64) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Empties the text buffer and zeroes the scroll delta.
    pub fn clear_transients(&mut self) {
        self.text.clear();
        self.text_overflowed = false;
        self.scroll_x = 0.0;
        self.scroll_y = 0.0;
    }

    /// Returns the gamepad at `id` if that slot is connected.
    pub fn connected_gamepad(&self, id: usize) -> Option<&GamepadState> {
        self.gamepads.get(id).filter(|g| g.is_connected())
    }
}

/// Returns true for characters that belong in the text buffer.
///
/// Letters, marks, numbers, punctuation, symbols and the ASCII space are
/// printable. Separators, control, format, private-use and unassigned code
/// points are not.
pub(crate) fn is_printable(ch: char) -> bool {
    ch == ' '
        || matches!(
            get_general_category(ch),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
                | GeneralCategory::DecimalNumber
                | GeneralCategory::LetterNumber
                | GeneralCategory::OtherNumber
                | GeneralCategory::ConnectorPunctuation
                | GeneralCategory::DashPunctuation
                | GeneralCategory::OpenPunctuation
                | GeneralCategory::ClosePunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
                | GeneralCategory::OtherPunctuation
                | GeneralCategory::MathSymbol
                | GeneralCategory::CurrencySymbol
                | GeneralCategory::ModifierSymbol
                | GeneralCategory::OtherSymbol
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_filter() {
        for ch in ['H', 'i', ' ', '7', '!', 'é', '字', '€', '\u{301}', 'Ⅻ', '_'] {
            assert!(is_printable(ch), "{ch:?} should be printable");
        }
        for ch in [
            '\x01', '\n', '\r', '\t', '\u{7f}', '\u{8}', '\u{a0}', '\u{3000}', '\u{2028}',
            // Format, private use and unassigned.
            '\u{200b}', '\u{ad}', '\u{feff}', '\u{e000}', '\u{378}',
        ] {
            assert!(!is_printable(ch), "{ch:?} should not be printable");
        }
    }

    #[test]
    fn text_limit_drops_newest() {
        let mut state = InputState::new(3, ScreenTransform::IDENTITY);
        for ch in "abcdef".chars() {
            state.push_char(ch);
        }
        assert_eq!(state.text, vec!['a', 'b', 'c']);

        state.clear_transients();
        state.push_char('z');
        assert_eq!(state.text, vec!['z']);
    }

    #[test]
    fn clear_transients_keeps_persistent_state() {
        let mut state = InputState::new(8, ScreenTransform::IDENTITY);
        state.key_held[Key::W.index()] = true;
        state.cursor_x = 40;
        state.touches.insert(1, TouchPosition { x: 1, y: 2 });
        state.push_char('q');
        state.set_wheel(0.5, -2.0);

        state.clear_transients();

        assert!(state.text.is_empty());
        assert_eq!((state.scroll_x, state.scroll_y), (0.0, 0.0));
        assert!(state.key_held[Key::W.index()]);
        assert_eq!(state.cursor_x, 40);
        assert_eq!(state.touches.len(), 1);
    }
}

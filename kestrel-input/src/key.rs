//! # Logical Keys and Mouse Buttons
//!
//! This module defines the set of keys and mouse buttons the engine tracks.
//!
//! Held state is rebuilt from scratch on every poll, so the set defined here is
//! exactly the set that can ever report `true`. Keys a device layer cannot
//! produce simply stay released.

use std::fmt;

macro_rules! keys {
    ($($name:ident),* $(,)?) => {
        /// A logical keyboard key recognized by the input layer.
        ///
        /// Keys are identified by physical position on a US layout, independent
        /// of the active keyboard layout. Text entry goes through the character
        /// callback instead.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Key {
            $(
                #[doc = concat!("The `", stringify!($name), "` key.")]
                $name,
            )*
        }

        impl Key {
            /// Every recognized key, ordered by [`Key::index`].
            pub const ALL: &'static [Key] = &[$(Key::$name,)*];
        }
    };
}

keys! {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Space, Enter, Escape, Tab, Backspace,
    Insert, Delete, Home, End, PageUp, PageDown,
    Minus, Equal, BracketLeft, BracketRight, Backslash,
    Semicolon, Apostrophe, GraveAccent, Comma, Period, Slash,
    CapsLock, NumLock, ScrollLock,
    PrintScreen, Pause, Menu,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter, NumpadEqual,
    ShiftLeft, ShiftRight, ControlLeft, ControlRight,
    AltLeft, AltRight, SuperLeft, SuperRight,
}

impl Key {
    /// Number of recognized keys.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index of this key, in `0..Key::COUNT`.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A mouse button recognized by the input layer.
///
/// Only the three standard buttons are tracked; extra buttons some mice
/// provide are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// The primary button (typically left).
    Left,
    /// The secondary button (typically right).
    Right,
    /// The middle button (typically a wheel click).
    Middle,
}

impl MouseButton {
    /// Every recognized mouse button, ordered by [`MouseButton::index`].
    pub const ALL: &'static [MouseButton] =
        &[MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Number of recognized mouse buttons.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index of this button, in `0..MouseButton::COUNT`.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Modifier keys held at the last poll.
///
/// Left and right variants are folded together.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    /// Either Shift key is held.
    pub shift: bool,
    /// Either Control key is held.
    pub control: bool,
    /// Either Alt key is held.
    pub alt: bool,
    /// Either Super key is held.
    pub super_key: bool,
}

impl Modifiers {
    /// Derives modifier state from a held-key table indexed by [`Key::index`].
    pub fn from_held(held: &[bool; Key::COUNT]) -> Self {
        let any = |a: Key, b: Key| held[a.index()] || held[b.index()];
        Self {
            shift: any(Key::ShiftLeft, Key::ShiftRight),
            control: any(Key::ControlLeft, Key::ControlRight),
            alt: any(Key::AltLeft, Key::AltRight),
            super_key: any(Key::SuperLeft, Key::SuperRight),
        }
    }

    /// Returns true if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.control || self.alt || self.super_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_indices_are_dense() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i, "{key} is out of order");
        }
        assert_eq!(Key::COUNT, Key::ALL.len());
    }

    #[test]
    fn keypad_and_system_keys_are_tracked() {
        let numpad = Key::ALL
            .iter()
            .filter(|key| key.to_string().starts_with("Numpad"))
            .count();
        assert_eq!(numpad, 17);
        for key in [Key::NumLock, Key::ScrollLock, Key::PrintScreen, Key::Pause, Key::Menu] {
            assert!(Key::ALL.contains(&key), "{key}");
        }
        assert_ne!(Key::NumpadEnter, Key::Enter);
    }

    #[test]
    fn mouse_button_indices_are_dense() {
        for (i, button) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
        assert_eq!(MouseButton::COUNT, 3);
    }

    #[test]
    fn modifiers_fold_left_and_right() {
        let mut held = [false; Key::COUNT];
        assert!(Modifiers::from_held(&held).is_empty());

        held[Key::ShiftRight.index()] = true;
        held[Key::ControlLeft.index()] = true;
        let modifiers = Modifiers::from_held(&held);
        assert_eq!(
            modifiers,
            Modifiers {
                shift: true,
                control: true,
                alt: false,
                super_key: false,
            }
        );
    }
}

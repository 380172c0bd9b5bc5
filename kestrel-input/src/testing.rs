//! # In-Memory Device Layer
//!
//! [`TestDevice`] is a [`DeviceLayer`] whose state is set directly by the
//! caller. It stands in for a native windowing library in tests and headless
//! tools.
//!
//! Push events ([`TestDevice::type_char`], [`TestDevice::scroll`]) invoke the
//! registered callbacks synchronously on the calling thread, the way a native
//! library invokes them from its event pump.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::{
    device::{CharCallback, DeviceLayer, GamepadReading, ScrollCallback, TouchId},
    gamepad::MAX_GAMEPADS,
    key::{Key, MouseButton},
};

/// A simulated gamepad plugged into a [`TestDevice`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestGamepad {
    /// Hardware identifier.
    pub guid: String,
    /// Device name.
    pub name: String,
    /// Axis values; any length.
    pub axes: Vec<f32>,
    /// Button states; any length.
    pub buttons: Vec<bool>,
}

impl TestGamepad {
    /// Creates a gamepad with `axis_count` centered axes and `button_count`
    /// released buttons.
    pub fn new(guid: &str, name: &str, axis_count: usize, button_count: usize) -> Self {
        Self {
            guid: guid.to_owned(),
            name: name.to_owned(),
            axes: vec![0.0; axis_count],
            buttons: vec![false; button_count],
        }
    }
}

struct DeviceState {
    keys: [bool; Key::COUNT],
    mouse_buttons: [bool; MouseButton::COUNT],
    cursor: (f64, f64),
    gamepads: [Option<TestGamepad>; MAX_GAMEPADS],
    touches: BTreeMap<TouchId, (f64, f64)>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            keys: [false; Key::COUNT],
            mouse_buttons: [false; MouseButton::COUNT],
            cursor: (0.0, 0.0),
            gamepads: Default::default(),
            touches: BTreeMap::new(),
        }
    }
}

/// A [`DeviceLayer`] driven entirely from code.
#[derive(Default)]
pub struct TestDevice {
    state: Mutex<DeviceState>,
    char_callback: Mutex<Option<CharCallback>>,
    scroll_callback: Mutex<Option<ScrollCallback>>,
    char_registrations: AtomicUsize,
    scroll_registrations: AtomicUsize,
}

impl TestDevice {
    /// Creates a device with nothing pressed and no gamepads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds `key` down.
    pub fn press_key(&self, key: Key) {
        self.state.lock().keys[key.index()] = true;
    }

    /// Releases `key`.
    pub fn release_key(&self, key: Key) {
        self.state.lock().keys[key.index()] = false;
    }

    /// Holds `button` down.
    pub fn press_mouse_button(&self, button: MouseButton) {
        self.state.lock().mouse_buttons[button.index()] = true;
    }

    /// Releases `button`.
    pub fn release_mouse_button(&self, button: MouseButton) {
        self.state.lock().mouse_buttons[button.index()] = false;
    }

    /// Moves the cursor to `(x, y)` device pixels.
    pub fn move_cursor(&self, x: f64, y: f64) {
        self.state.lock().cursor = (x, y);
    }

    /// Plugs `gamepad` into `slot`, replacing whatever was there.
    ///
    /// Slots at or past [`MAX_GAMEPADS`] are ignored.
    pub fn connect_gamepad(&self, slot: usize, gamepad: TestGamepad) {
        if let Some(entry) = self.state.lock().gamepads.get_mut(slot) {
            *entry = Some(gamepad);
        }
    }

    /// Unplugs the gamepad at `slot`, returning it.
    pub fn disconnect_gamepad(&self, slot: usize) -> Option<TestGamepad> {
        self.state
            .lock()
            .gamepads
            .get_mut(slot)
            .and_then(Option::take)
    }

    /// Starts or moves touch `id` at `(x, y)` device pixels.
    pub fn touch(&self, id: TouchId, x: f64, y: f64) {
        self.state.lock().touches.insert(id, (x, y));
    }

    /// Ends touch `id`.
    pub fn lift_touch(&self, id: TouchId) {
        self.state.lock().touches.remove(&id);
    }

    /// Delivers a character to the registered callback.
    ///
    /// Returns false if no callback is registered yet.
    pub fn type_char(&self, ch: char) -> bool {
        // Clone out so the callback runs without our lock held.
        let callback = self.char_callback.lock().clone();
        match callback {
            Some(callback) => {
                callback(ch);
                true
            }
            None => false,
        }
    }

    /// Delivers every character of `text` in order.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|ch| self.type_char(ch))
    }

    /// Delivers a scroll delta to the registered callback.
    ///
    /// Returns false if no callback is registered yet.
    pub fn scroll(&self, x: f64, y: f64) -> bool {
        let callback = self.scroll_callback.lock().clone();
        match callback {
            Some(callback) => {
                callback(x, y);
                true
            }
            None => false,
        }
    }

    /// How many times a character callback was installed.
    pub fn char_registrations(&self) -> usize {
        self.char_registrations.load(Ordering::SeqCst)
    }

    /// How many times a scroll callback was installed.
    pub fn scroll_registrations(&self) -> usize {
        self.scroll_registrations.load(Ordering::SeqCst)
    }
}

impl DeviceLayer for TestDevice {
    fn is_key_down(&self, key: Key) -> bool {
        self.state.lock().keys[key.index()]
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.state.lock().mouse_buttons[button.index()]
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.state.lock().cursor
    }

    fn read_gamepad(&self, slot: usize, visit: &mut dyn FnMut(GamepadReading<'_>)) {
        let state = self.state.lock();
        if let Some(Some(gamepad)) = state.gamepads.get(slot) {
            visit(GamepadReading {
                guid: &gamepad.guid,
                name: &gamepad.name,
                axes: &gamepad.axes,
                buttons: &gamepad.buttons,
            });
        }
    }

    fn read_touches(&self, visit: &mut dyn FnMut(TouchId, f64, f64)) {
        let state = self.state.lock();
        for (&id, &(x, y)) in &state.touches {
            visit(id, x, y);
        }
    }

    fn set_char_callback(&self, callback: CharCallback) {
        self.char_registrations.fetch_add(1, Ordering::SeqCst);
        *self.char_callback.lock() = Some(callback);
    }

    fn set_scroll_callback(&self, callback: ScrollCallback) {
        self.scroll_registrations.fetch_add(1, Ordering::SeqCst);
        *self.scroll_callback.lock() = Some(callback);
    }
}

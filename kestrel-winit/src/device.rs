//! # winit Device Layer
//!
//! [`WinitDevice`] turns the event stream of one winit window into the
//! query surface a [`DeviceLayer`] must provide. Held keys, buttons, cursor
//! and touches are recorded as events arrive and read back on poll.
//! Characters and scroll deltas are forwarded to the registered callbacks as
//! soon as they arrive.
//!
//! winit has no gamepad API, so no gamepad is ever reported.

use std::collections::BTreeMap;

use kestrel_input::{
    CharCallback, DeviceLayer, GamepadReading, Key, MouseButton, ScrollCallback, TouchId,
};
use parking_lot::RwLock;
use tracing::{debug, trace};
use winit::{
    event::{ElementState, Ime, MouseScrollDelta, TouchPhase, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::keymap::{key_from_code, mouse_button_from_winit};

struct HeldState {
    keys: [bool; Key::COUNT],
    mouse_buttons: [bool; MouseButton::COUNT],
    cursor: (f64, f64),
    touches: BTreeMap<TouchId, (f64, f64)>,
    /// While an IME is active, text arrives through commits only.
    ime_enabled: bool,
}

impl Default for HeldState {
    fn default() -> Self {
        Self {
            keys: [false; Key::COUNT],
            mouse_buttons: [false; MouseButton::COUNT],
            cursor: (0.0, 0.0),
            touches: BTreeMap::new(),
            ime_enabled: false,
        }
    }
}

#[derive(Default)]
struct Callbacks {
    on_char: Option<CharCallback>,
    on_scroll: Option<ScrollCallback>,
}

/// A [`DeviceLayer`] fed by winit window events.
///
/// Create one per window and pass every [`WindowEvent`] of that window to
/// [`WinitDevice::handle_window_event`].
#[derive(Default)]
pub struct WinitDevice {
    held: RwLock<HeldState>,
    callbacks: RwLock<Callbacks>,
}

impl WinitDevice {
    /// Creates a device with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the input carried by `event`. Other events are ignored.
    pub fn handle_window_event(&self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.record_key(code, event.state);
                }
                if event.state == ElementState::Pressed
                    && !self.held.read().ime_enabled
                    && let Some(text) = &event.text
                {
                    self.record_text(text);
                }
            }
            WindowEvent::Ime(ime) => match ime {
                Ime::Enabled => self.held.write().ime_enabled = true,
                Ime::Disabled => self.held.write().ime_enabled = false,
                Ime::Commit(text) => self.record_text(text),
                Ime::Preedit(..) => {}
            },
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = mouse_button_from_winit(*button) {
                    self.record_mouse_button(button, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.record_cursor(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match *delta {
                    MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
                    MouseScrollDelta::PixelDelta(delta) => (delta.x, delta.y),
                };
                self.record_scroll(x, y);
            }
            WindowEvent::Touch(touch) => {
                self.record_touch(touch.id, touch.phase, touch.location.x, touch.location.y);
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Records a physical key transition. Untracked keys are ignored.
    pub fn record_key(&self, code: KeyCode, state: ElementState) {
        let Some(key) = key_from_code(code) else {
            trace!("Ignoring untracked key {code:?}");
            return;
        };
        self.held.write().keys[key.index()] = state.is_pressed();
    }

    /// Records a mouse button transition.
    pub fn record_mouse_button(&self, button: MouseButton, state: ElementState) {
        self.held.write().mouse_buttons[button.index()] = state.is_pressed();
    }

    /// Records the cursor position in physical pixels.
    pub fn record_cursor(&self, x: f64, y: f64) {
        self.held.write().cursor = (x, y);
    }

    /// Records a touch phase change at `(x, y)` physical pixels.
    pub fn record_touch(&self, id: TouchId, phase: TouchPhase, x: f64, y: f64) {
        let mut held = self.held.write();
        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                held.touches.insert(id, (x, y));
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                held.touches.remove(&id);
            }
        }
    }

    /// Forwards every character of `text` to the character callback.
    pub fn record_text(&self, text: &str) {
        for ch in text.chars() {
            self.record_char(ch);
        }
    }

    /// Forwards `ch` to the character callback, if one is registered.
    pub fn record_char(&self, ch: char) {
        let callback = self.callbacks.read().on_char.clone();
        match callback {
            Some(callback) => callback(ch),
            None => trace!("Dropping character {ch:?}: no callback registered"),
        }
    }

    /// Forwards a scroll delta to the scroll callback, if one is registered.
    pub fn record_scroll(&self, x: f64, y: f64) {
        let callback = self.callbacks.read().on_scroll.clone();
        if let Some(callback) = callback {
            callback(x, y);
        }
    }

    /// Releases every key, mouse button and touch.
    ///
    /// Called when the window loses focus, since release events are not
    /// delivered to an unfocused window.
    pub fn release_all(&self) {
        let mut held = self.held.write();
        held.keys = [false; Key::COUNT];
        held.mouse_buttons = [false; MouseButton::COUNT];
        held.touches.clear();
        debug!("Focus lost, released all held input");
    }
}

impl DeviceLayer for WinitDevice {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.read().keys[key.index()]
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.held.read().mouse_buttons[button.index()]
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.held.read().cursor
    }

    fn read_gamepad(&self, _slot: usize, _visit: &mut dyn FnMut(GamepadReading<'_>)) {}

    fn read_touches(&self, visit: &mut dyn FnMut(TouchId, f64, f64)) {
        let held = self.held.read();
        for (&id, &(x, y)) in &held.touches {
            visit(id, x, y);
        }
    }

    fn set_char_callback(&self, callback: CharCallback) {
        self.callbacks.write().on_char = Some(callback);
    }

    fn set_scroll_callback(&self, callback: ScrollCallback) {
        self.callbacks.write().on_scroll = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kestrel_input::Input;

    use super::*;

    fn polled(device: &WinitDevice, scale_factor: f64) -> Input {
        let input = Input::new();
        input.poll(device, scale_factor);
        input
    }

    #[test]
    fn key_transitions_are_held_until_release() {
        let device = WinitDevice::new();
        device.record_key(KeyCode::KeyW, ElementState::Pressed);
        device.record_key(KeyCode::F24, ElementState::Pressed);
        let input = polled(&device, 1.0);
        assert!(input.is_key_pressed(Key::W));

        device.record_key(KeyCode::KeyW, ElementState::Released);
        input.poll(&device, 1.0);
        assert!(!input.is_key_pressed(Key::W));
    }

    #[test]
    fn cursor_and_buttons_reach_input() {
        let device = WinitDevice::new();
        device.record_cursor(300.5, 121.0);
        device.record_mouse_button(MouseButton::Left, ElementState::Pressed);
        let input = polled(&device, 1.5);

        assert_eq!(input.cursor_position(), (200, 80));
        assert!(input.is_mouse_button_pressed(MouseButton::Left));
        assert!(!input.is_mouse_button_pressed(MouseButton::Right));
    }

    #[test]
    fn text_and_scroll_need_a_poll_first() {
        let device = WinitDevice::new();
        device.record_text("lost");
        device.record_scroll(0.0, 4.0);
        let input = polled(&device, 1.0);
        assert_eq!(input.text(), "");
        assert_eq!(input.wheel(), (0.0, 0.0));

        device.record_text("ok\n");
        device.record_scroll(0.0, -2.0);
        assert_eq!(input.text(), "ok");
        assert_eq!(input.wheel(), (0.0, -2.0));
    }

    #[test]
    fn ime_commit_is_forwarded() {
        let device = WinitDevice::new();
        let input = polled(&device, 1.0);
        device.handle_window_event(&WindowEvent::Ime(Ime::Enabled));
        device.handle_window_event(&WindowEvent::Ime(Ime::Commit("日本".to_owned())));
        assert_eq!(input.text(), "日本");
    }

    #[test]
    fn touches_follow_phases() {
        let device = WinitDevice::new();
        device.record_touch(1, TouchPhase::Started, 10.0, 10.0);
        device.record_touch(2, TouchPhase::Started, 20.0, 20.0);
        device.record_touch(1, TouchPhase::Moved, 40.0, 60.0);
        device.record_touch(2, TouchPhase::Cancelled, 20.0, 20.0);
        let input = polled(&device, 2.0);

        assert_eq!(input.touch_ids(), vec![1]);
        assert_eq!(input.touch_position(1), (20, 30));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let device = WinitDevice::new();
        device.record_key(KeyCode::AltLeft, ElementState::Pressed);
        device.record_mouse_button(MouseButton::Right, ElementState::Pressed);
        device.record_touch(9, TouchPhase::Started, 1.0, 1.0);
        device.record_cursor(5.0, 6.0);

        device.handle_window_event(&WindowEvent::Focused(false));
        let input = polled(&device, 1.0);

        assert!(!input.is_key_pressed(Key::AltLeft));
        assert!(!input.is_mouse_button_pressed(MouseButton::Right));
        assert!(input.touch_ids().is_empty());
        assert_eq!(input.cursor_position(), (5, 6));
    }

    #[test]
    fn never_reports_gamepads() {
        let device = WinitDevice::new();
        let input = polled(&device, 1.0);
        assert!(input.gamepad_ids().is_empty());
    }

    #[test]
    fn shared_device_accepts_events_from_other_threads() {
        let device = Arc::new(WinitDevice::new());
        let input = Arc::new(Input::new());
        input.poll(&device, 1.0);

        let sender = {
            let device = device.clone();
            std::thread::spawn(move || device.record_text("abc"))
        };
        sender.join().expect("sender thread panicked");
        assert_eq!(input.text(), "abc");
    }
}

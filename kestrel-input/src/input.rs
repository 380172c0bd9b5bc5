//! # Input Synchronization
//!
//! [`Input`] is the per-window handle the engine passes to its frame loop and
//! shares with game logic.
//!
//! ## Frame Protocol
//!
//! The frame loop calls, once per frame and in this order:
//!
//! 1. [`Input::poll`] to rebuild persistent state from the device layer.
//! 2. Game logic reads through the query methods, from any thread.
//! 3. [`Input::end_frame`] to clear text and scroll.
//!
//! Character and scroll callbacks may run at any point in between, on any
//! thread. The ordering of `end_frame` relative to queries and the next poll
//! is the caller's responsibility and is not checked.
//!
//! ## Concurrency
//!
//! All state, including the coordinate transform, sits behind one
//! reader-writer lock. Polls, callbacks, the frame boundary and transform
//! setters take it exclusively; queries share it. Every query therefore
//! observes the result of exactly one completed write. Position queries copy
//! the raw position and the transform under the same guard and adjust after
//! releasing it. Use
//! [`Input::snapshot`] or [`Input::with_gamepad`] when several fields must come
//! from the same write.
//!
//! ## Invalid Indices
//!
//! Gamepad and touch queries never fail. An id outside `0..MAX_GAMEPADS`, a
//! disconnected slot, or an axis/button past the device's count yields a
//! neutral value: `""`, `0`, `0.0`, `false` or `(0, 0)`.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{
    config::{DEFAULT_TEXT_BUFFER_LIMIT, InputConfig},
    device::{DeviceLayer, TouchId},
    error::InputError,
    gamepad::GamepadState,
    key::{Key, Modifiers, MouseButton},
    snapshot::InputSnapshot,
    state::{InputState, is_printable},
    transform::ScreenTransform,
};

/// Frame-stable input state for one window.
///
/// `Input` is `Send + Sync`; share it between the frame loop and game logic
/// with an [`Arc`].
///
/// # Examples
///
/// ```rust,ignore
/// use kestrel_input::{Input, Key, testing::TestDevice};
///
/// let device = TestDevice::new();
/// let input = Input::new();
///
/// device.press_key(Key::Space);
/// input.poll(&device, 1.0);
/// assert!(input.is_key_pressed(Key::Space));
///
/// device.type_char('k');
/// assert_eq!(input.text(), "k");
///
/// input.end_frame();
/// assert_eq!(input.text(), "");
/// assert!(input.is_key_pressed(Key::Space));
/// ```
pub struct Input {
    state: Arc<RwLock<InputState>>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    /// Creates an input layer with the default configuration.
    pub fn new() -> Self {
        Self::from_state(InputState::new(
            DEFAULT_TEXT_BUFFER_LIMIT,
            ScreenTransform::IDENTITY,
        ))
    }

    /// Creates an input layer from `config`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the scale factor, offset or text buffer
    /// limit is invalid.
    pub fn with_config(config: InputConfig) -> Result<Self, InputError> {
        let (offset_x, offset_y) = config.screen_offset;
        let transform = ScreenTransform::new(config.initial_scale_factor, offset_x, offset_y)?;
        if config.text_buffer_limit == 0 {
            return Err(InputError::ZeroTextBufferLimit);
        }
        Ok(Self::from_state(InputState::new(
            config.text_buffer_limit,
            transform,
        )))
    }

    fn from_state(state: InputState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Rebuilds persistent input state from `device`.
    ///
    /// Keys, mouse buttons, cursor, gamepads and touches are re-read in full.
    /// Text and scroll are left alone. `scale_factor` becomes the active scale
    /// factor for position queries; a non-finite or non-positive value is
    /// logged and ignored.
    ///
    /// The first call registers the character and scroll callbacks with
    /// `device`. Later calls never register again, whichever thread they come
    /// from.
    pub fn poll<D: DeviceLayer + ?Sized>(&self, device: &D, scale_factor: f64) {
        let mut state = self.state.write();
        if !state.callbacks_registered {
            Self::register_callbacks(Arc::downgrade(&self.state), device);
            state.callbacks_registered = true;
            info!("Registered character and scroll callbacks");
        }
        state.refresh(device);

        match state.transform.with_scale(scale_factor) {
            Ok(updated) => state.transform = updated,
            Err(err) => warn!("Ignoring scale factor from poll: {err}"),
        }
    }

    fn register_callbacks<D: DeviceLayer + ?Sized>(state: Weak<RwLock<InputState>>, device: &D) {
        let char_state = state.clone();
        device.set_char_callback(Arc::new(move |ch: char| {
            if !is_printable(ch) {
                return;
            }
            if let Some(state) = char_state.upgrade() {
                state.write().push_char(ch);
            }
        }));

        device.set_scroll_callback(Arc::new(move |x: f64, y: f64| {
            if let Some(state) = state.upgrade() {
                state.write().set_wheel(x, y);
            }
        }));
    }

    /// Marks the end of a frame: empties the text buffer and zeroes the
    /// scroll delta.
    ///
    /// Held keys, buttons, cursor, gamepads and touches are not affected; the
    /// next poll refreshes them.
    pub fn end_frame(&self) {
        self.state.write().clear_transients();
    }

    /// Replaces the active scale factor.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidScaleFactor`] if `scale_factor` is not
    /// finite and positive. The previous factor stays active.
    pub fn set_scale_factor(&self, scale_factor: f64) -> Result<(), InputError> {
        let mut state = self.state.write();
        state.transform = state.transform.with_scale(scale_factor)?;
        Ok(())
    }

    /// Replaces the offset of the logical origin, in device pixels.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidOffset`] if either component is not
    /// finite. The previous offset stays active.
    pub fn set_screen_offset(&self, x: f64, y: f64) -> Result<(), InputError> {
        let mut state = self.state.write();
        state.transform = state.transform.with_offset(x, y)?;
        Ok(())
    }

    /// The active coordinate transform.
    pub fn screen_transform(&self) -> ScreenTransform {
        self.state.read().transform
    }

    /// Returns true if `key` was held at the last poll.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.state.read().key_held[key.index()]
    }

    /// Returns true if `button` was held at the last poll.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.state.read().mouse_button_held[button.index()]
    }

    /// Modifier keys held at the last poll.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_held(&self.state.read().key_held)
    }

    /// Cursor position at the last poll, in logical coordinates.
    pub fn cursor_position(&self) -> (i32, i32) {
        let (transform, x, y) = {
            let state = self.state.read();
            (state.transform, state.cursor_x, state.cursor_y)
        };
        adjust(&transform, x, y)
    }

    /// Scroll delta reported since the last frame boundary.
    pub fn wheel(&self) -> (f64, f64) {
        let state = self.state.read();
        (state.scroll_x, state.scroll_y)
    }

    /// Text entered since the last frame boundary.
    pub fn text(&self) -> String {
        self.state.read().text.iter().collect()
    }

    /// Characters entered since the last frame boundary, in arrival order.
    pub fn text_chars(&self) -> Vec<char> {
        self.state.read().text.clone()
    }

    /// Sorted ids of the connected gamepads. Empty if none are connected.
    pub fn gamepad_ids(&self) -> Vec<usize> {
        self.state
            .read()
            .gamepads
            .iter()
            .enumerate()
            .filter(|(_, gamepad)| gamepad.is_connected())
            .map(|(id, _)| id)
            .collect()
    }

    /// Runs `f` on the gamepad at `id` under a single read lock.
    ///
    /// Returns `None` if `id` is out of range or not connected.
    pub fn with_gamepad<R>(&self, id: usize, f: impl FnOnce(&GamepadState) -> R) -> Option<R> {
        let state = self.state.read();
        state.connected_gamepad(id).map(f)
    }

    /// Returns true if a gamepad is connected at `id`.
    pub fn is_gamepad_connected(&self, id: usize) -> bool {
        self.with_gamepad(id, |_| ()).is_some()
    }

    /// Hardware identifier of the gamepad at `id`, or `""`.
    pub fn gamepad_guid(&self, id: usize) -> String {
        self.with_gamepad(id, |g| g.guid().to_owned())
            .unwrap_or_default()
    }

    /// Name of the gamepad at `id`, or `""`.
    pub fn gamepad_name(&self, id: usize) -> String {
        self.with_gamepad(id, |g| g.name().to_owned())
            .unwrap_or_default()
    }

    /// Number of axes of the gamepad at `id`, or `0`.
    pub fn gamepad_axis_count(&self, id: usize) -> usize {
        self.with_gamepad(id, GamepadState::axis_count)
            .unwrap_or(0)
    }

    /// Value of `axis` on the gamepad at `id`, or `0.0`.
    pub fn gamepad_axis(&self, id: usize, axis: usize) -> f64 {
        self.with_gamepad(id, |g| g.axis(axis)).unwrap_or(0.0)
    }

    /// Number of buttons of the gamepad at `id`, or `0`.
    pub fn gamepad_button_count(&self, id: usize) -> usize {
        self.with_gamepad(id, GamepadState::button_count)
            .unwrap_or(0)
    }

    /// Returns true if `button` is pressed on the gamepad at `id`.
    pub fn is_gamepad_button_pressed(&self, id: usize, button: usize) -> bool {
        self.with_gamepad(id, |g| g.is_button_pressed(button))
            .unwrap_or(false)
    }

    /// Sorted ids of the active touches. Empty if nothing is touching.
    pub fn touch_ids(&self) -> Vec<TouchId> {
        self.state.read().touches.keys().copied().collect()
    }

    /// Returns true if touch `id` was active at the last poll.
    ///
    /// Use this to tell a missing touch from one at `(0, 0)`.
    pub fn has_touch(&self, id: TouchId) -> bool {
        self.state.read().touches.contains_key(&id)
    }

    /// Position of touch `id` in logical coordinates, or `(0, 0)` if it is not
    /// active.
    pub fn touch_position(&self, id: TouchId) -> (i32, i32) {
        let (transform, position) = {
            let state = self.state.read();
            (state.transform, state.touches.get(&id).copied())
        };
        match position {
            Some(position) => adjust(&transform, position.x, position.y),
            None => (0, 0),
        }
    }

    /// Copies the whole input state under one read lock.
    pub fn snapshot(&self) -> InputSnapshot {
        let state = self.state.read();
        let transform = state.transform;
        InputSnapshot {
            key_held: state.key_held,
            mouse_button_held: state.mouse_button_held,
            cursor: adjust(&transform, state.cursor_x, state.cursor_y),
            wheel: (state.scroll_x, state.scroll_y),
            text: state.text.iter().collect(),
            gamepads: state
                .gamepads
                .iter()
                .enumerate()
                .filter(|(_, gamepad)| gamepad.is_connected())
                .map(|(id, gamepad)| (id, gamepad.clone()))
                .collect(),
            touches: state
                .touches
                .iter()
                .map(|(&id, position)| (id, adjust(&transform, position.x, position.y)))
                .collect(),
        }
    }
}

fn adjust(transform: &ScreenTransform, x: i32, y: i32) -> (i32, i32) {
    transform.adjust(f64::from(x), f64::from(y))
}

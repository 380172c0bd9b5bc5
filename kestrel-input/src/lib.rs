//! kestrel-input synchronizes raw device input with game logic running on
//! other threads.
//!
//! A windowing backend implements [`DeviceLayer`] and drives an [`Input`] once
//! per frame. Game logic queries the same [`Input`] and always observes a
//! consistent state.
//!
//! # Frame Loop
//!
//! ```
//! use std::sync::Arc;
//!
//! use kestrel_input::{DeviceLayer, Input};
//!
//! fn run_frame(input: &Arc<Input>, device: &impl DeviceLayer, scale_factor: f64) {
//!     input.poll(device, scale_factor);
//!
//!     // Game logic reads input, possibly on other threads.
//!     let (x, y) = input.cursor_position();
//!     let typed = input.text();
//!     # let _ = (x, y, typed);
//!
//!     input.end_frame();
//! }
//! ```
//!
//! # State Kinds
//!
//! - **Held state** (keys, mouse buttons, gamepads, cursor, touches) is
//!   re-read in full on every [`Input::poll`].
//! - **Transient state** (text, scroll) accumulates from push callbacks and is
//!   cleared by [`Input::end_frame`].
//!
//! # Gamepads
//!
//! Up to [`MAX_GAMEPADS`] gamepads are tracked in fixed slots. Each holds up to
//! [`MAX_GAMEPAD_AXES`] axes and [`MAX_GAMEPAD_BUTTONS`] buttons. Queries on
//! empty slots or missing axes return neutral values rather than failing.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod config;
pub mod device;
pub mod error;
pub mod gamepad;
mod input;
pub mod key;
pub mod snapshot;
mod state;
pub mod transform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use crate::{
    config::InputConfig,
    device::{CharCallback, DeviceLayer, GamepadReading, ScrollCallback, TouchId},
    error::InputError,
    gamepad::{GamepadState, MAX_GAMEPAD_AXES, MAX_GAMEPAD_BUTTONS, MAX_GAMEPADS},
    input::Input,
    key::{Key, Modifiers, MouseButton},
    snapshot::InputSnapshot,
    transform::ScreenTransform,
};

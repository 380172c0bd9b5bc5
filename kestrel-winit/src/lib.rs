//! winit device layer for kestrel-input.
//!
//! ## Usage
//!
//! Forward every [`WindowEvent`](winit::event::WindowEvent) of a window to a
//! [`WinitDevice`], then poll an [`Input`](kestrel_input::Input) from it once per
//! frame.
//!
//! ```no_run
//! use kestrel_input::Input;
//! use kestrel_winit::WinitDevice;
//! use winit::event::WindowEvent;
//!
//! fn on_event(device: &WinitDevice, input: &Input, event: &WindowEvent, scale_factor: f64) {
//!     device.handle_window_event(event);
//!     if matches!(event, WindowEvent::RedrawRequested) {
//!         input.poll(device, scale_factor);
//!         // ... frame ...
//!         input.end_frame();
//!     }
//! }
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod device;
pub mod keymap;

pub use winit;

pub use crate::{
    device::WinitDevice,
    keymap::{key_from_code, mouse_button_from_winit},
};

//! # Gamepad Slots
//!
//! Gamepads live in a fixed table of [`MAX_GAMEPADS`] slots. The slot index is
//! the public gamepad identifier and stays stable for as long as the device
//! remains connected. Once a device disconnects its slot may later be taken by
//! a different device.
//!
//! Each slot stores axes and buttons in fixed arrays sized for the worst case,
//! together with the count the device actually reported. Entries at or past
//! the count are always zero / released, so a small controller that replaces a
//! large one never exposes the previous device's readings.

use tracing::debug;

use crate::device::GamepadReading;

/// Number of gamepad slots.
pub const MAX_GAMEPADS: usize = 16;

/// Maximum number of axes tracked per gamepad.
pub const MAX_GAMEPAD_AXES: usize = 16;

/// Maximum number of buttons tracked per gamepad.
pub const MAX_GAMEPAD_BUTTONS: usize = 256;

/// State of one gamepad slot at the last poll.
#[derive(Debug, Clone)]
pub struct GamepadState {
    connected: bool,
    guid: String,
    name: String,
    axis_count: usize,
    axes: [f64; MAX_GAMEPAD_AXES],
    button_count: usize,
    buttons: [bool; MAX_GAMEPAD_BUTTONS],
}

impl Default for GamepadState {
    fn default() -> Self {
        Self {
            connected: false,
            guid: String::new(),
            name: String::new(),
            axis_count: 0,
            axes: [0.0; MAX_GAMEPAD_AXES],
            button_count: 0,
            buttons: [false; MAX_GAMEPAD_BUTTONS],
        }
    }
}

impl GamepadState {
    /// Returns true if a device occupied this slot at the last poll.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Hardware identifier of the connected device, empty when disconnected.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Name of the connected device, empty when disconnected.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of axes reported by the device, at most [`MAX_GAMEPAD_AXES`].
    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    /// Value of `axis`, or `0.0` if the device has no such axis.
    pub fn axis(&self, axis: usize) -> f64 {
        if axis < self.axis_count {
            self.axes[axis]
        } else {
            0.0
        }
    }

    /// Values of the reported axes.
    pub fn axes(&self) -> &[f64] {
        &self.axes[..self.axis_count]
    }

    /// Number of buttons reported by the device, at most [`MAX_GAMEPAD_BUTTONS`].
    pub fn button_count(&self) -> usize {
        self.button_count
    }

    /// Returns true if `button` is pressed; false if the device has no such button.
    pub fn is_button_pressed(&self, button: usize) -> bool {
        button < self.button_count && self.buttons[button]
    }

    /// States of the reported buttons.
    pub fn buttons(&self) -> &[bool] {
        &self.buttons[..self.button_count]
    }

    /// Overwrites this slot with a fresh reading from the device at `slot`.
    ///
    /// Every field is recomputed; nothing from the previous reading survives.
    pub(crate) fn load(&mut self, slot: usize, reading: GamepadReading<'_>) {
        if !self.connected {
            debug!(
                "Gamepad connected at slot {slot}: {} ({})",
                reading.name, reading.guid
            );
        } else if self.guid != reading.guid {
            debug!(
                "Gamepad at slot {slot} replaced: {} -> {} ({})",
                self.name, reading.name, reading.guid
            );
        }

        self.connected = true;
        // Reuse the string buffers instead of reallocating every poll.
        self.guid.clear();
        self.guid.push_str(reading.guid);
        self.name.clear();
        self.name.push_str(reading.name);

        self.axis_count = reading.axes.len().min(MAX_GAMEPAD_AXES);
        for (i, axis) in self.axes.iter_mut().enumerate() {
            *axis = reading.axes.get(i).copied().map_or(0.0, f64::from);
        }

        self.button_count = reading.buttons.len().min(MAX_GAMEPAD_BUTTONS);
        for (i, button) in self.buttons.iter_mut().enumerate() {
            *button = reading.buttons.get(i).copied().unwrap_or(false);
        }
    }

    /// Marks this slot as empty and resets every derived field.
    pub(crate) fn disconnect(&mut self, slot: usize) {
        if !self.connected {
            return;
        }
        debug!("Gamepad disconnected from slot {slot}: {}", self.name);

        self.connected = false;
        self.guid.clear();
        self.name.clear();
        self.axis_count = 0;
        self.axes = [0.0; MAX_GAMEPAD_AXES];
        self.button_count = 0;
        self.buttons = [false; MAX_GAMEPAD_BUTTONS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading<'a>(guid: &'a str, axes: &'a [f32], buttons: &'a [bool]) -> GamepadReading<'a> {
        GamepadReading {
            guid,
            name: "Test Pad",
            axes,
            buttons,
        }
    }

    #[test]
    fn default_slot_is_neutral() {
        let slot = GamepadState::default();
        assert!(!slot.is_connected());
        assert_eq!(slot.guid(), "");
        assert_eq!(slot.name(), "");
        assert_eq!(slot.axis_count(), 0);
        assert_eq!(slot.button_count(), 0);
        assert_eq!(slot.axis(0), 0.0);
        assert!(!slot.is_button_pressed(0));
        assert!(slot.axes().is_empty());
        assert!(slot.buttons().is_empty());
    }

    #[test]
    fn load_clips_to_capacity() {
        let axes = [0.25f32; 20];
        let buttons = [true; 300];
        let mut slot = GamepadState::default();
        slot.load(0, reading("big", &axes, &buttons));

        assert_eq!(slot.axis_count(), MAX_GAMEPAD_AXES);
        assert_eq!(slot.button_count(), MAX_GAMEPAD_BUTTONS);
        assert_eq!(slot.axis(MAX_GAMEPAD_AXES - 1), 0.25);
        assert_eq!(slot.axis(MAX_GAMEPAD_AXES), 0.0);
        assert!(slot.is_button_pressed(MAX_GAMEPAD_BUTTONS - 1));
        assert!(!slot.is_button_pressed(MAX_GAMEPAD_BUTTONS));
    }

    #[test]
    fn smaller_device_pads_with_zero() {
        let mut slot = GamepadState::default();
        slot.load(3, reading("six", &[0.5; 6], &[true; 12]));
        slot.load(3, reading("two", &[-1.0; 2], &[true; 4]));

        assert_eq!(slot.guid(), "two");
        assert_eq!(slot.axis_count(), 2);
        assert_eq!(slot.axes(), &[-1.0, -1.0]);
        assert_eq!(slot.button_count(), 4);
        // Stored entries past the count are cleared, not just hidden.
        assert!(slot.axes[2..].iter().all(|&v| v == 0.0));
        assert!(slot.buttons[4..].iter().all(|&b| !b));
    }

    #[test]
    fn disconnect_resets_every_field() {
        let mut slot = GamepadState::default();
        slot.load(1, reading("pad", &[0.75; 4], &[true; 8]));
        slot.disconnect(1);

        assert!(!slot.is_connected());
        assert_eq!(slot.guid(), "");
        assert_eq!(slot.name(), "");
        assert_eq!(slot.axis_count(), 0);
        assert_eq!(slot.button_count(), 0);
        assert!(slot.axes.iter().all(|&v| v == 0.0));
        assert!(slot.buttons.iter().all(|&b| !b));
    }
}

//! Device abstraction consumed by the tracker
//!
//! The environment hands the tracker a [`GamepadDevice`] on attach and asks it
//! for a fresh [`DeviceSnapshot`] once per poll step.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identity carried by attach/detach signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceId(pub usize);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw readings for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub buttons: Vec<bool>,
    pub axes: Vec<f32>,
}

impl DeviceSnapshot {
    pub fn new(buttons: Vec<bool>, axes: Vec<f32>) -> Self {
        Self { buttons, axes }
    }

    /// Pressed flag for `idx`, released when the device did not report it
    pub fn button(&self, idx: usize) -> bool {
        self.buttons.get(idx).copied().unwrap_or(false)
    }

    /// Axis reading for `idx`, 0.0 when the device did not report it
    pub fn axis(&self, idx: usize) -> f32 {
        self.axes.get(idx).copied().unwrap_or(0.0)
    }
}

/// A single attached gamepad
pub trait GamepadDevice {
    fn id(&self) -> DeviceId;

    fn name(&self) -> &str;

    fn button_count(&self) -> usize;

    fn axis_count(&self) -> usize;

    /// Point-in-time readings, taken once per poll step
    fn snapshot(&self) -> DeviceSnapshot;
}

/// Software gamepad whose readings are set by hand
///
/// Clones share the same readings, so one handle can be attached to a
/// tracker while another drives it.
#[derive(Debug, Clone)]
pub struct VirtualGamepad {
    id: DeviceId,
    name: String,
    button_count: usize,
    axis_count: usize,
    readings: Rc<RefCell<DeviceSnapshot>>,
}

impl VirtualGamepad {
    pub fn new(id: usize, name: impl Into<String>, button_count: usize, axis_count: usize) -> Self {
        Self {
            id: DeviceId(id),
            name: name.into(),
            button_count,
            axis_count,
            readings: Rc::new(RefCell::new(DeviceSnapshot::new(
                vec![false; button_count],
                vec![0.0; axis_count],
            ))),
        }
    }

    pub fn set_button(&self, idx: usize, pressed: bool) {
        if let Some(slot) = self.readings.borrow_mut().buttons.get_mut(idx) {
            *slot = pressed;
        }
    }

    pub fn set_axis(&self, idx: usize, value: f32) {
        if let Some(slot) = self.readings.borrow_mut().axes.get_mut(idx) {
            *slot = value;
        }
    }

    pub fn set_buttons(&self, pressed: &[bool]) {
        self.readings.borrow_mut().buttons = pressed.to_vec();
    }

    pub fn set_axes(&self, values: &[f32]) {
        self.readings.borrow_mut().axes = values.to_vec();
    }
}

impl GamepadDevice for VirtualGamepad {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn button_count(&self) -> usize {
        self.button_count
    }

    fn axis_count(&self) -> usize {
        self.axis_count
    }

    fn snapshot(&self) -> DeviceSnapshot {
        self.readings.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults_for_missing_readings() {
        let snapshot = DeviceSnapshot::new(vec![true], vec![0.25]);
        assert!(snapshot.button(0));
        assert!(!snapshot.button(5));
        assert_eq!(snapshot.axis(0), 0.25);
        assert_eq!(snapshot.axis(9), 0.0);
    }

    #[test]
    fn test_virtual_gamepad_clones_share_readings() {
        let pad = VirtualGamepad::new(4, "Virtual Pad", 2, 1);
        let driver = pad.clone();

        driver.set_button(1, true);
        driver.set_axis(0, -0.75);
        driver.set_button(7, true); // out of range, ignored

        let snapshot = pad.snapshot();
        assert_eq!(snapshot.buttons, vec![false, true]);
        assert_eq!(snapshot.axes, vec![-0.75]);
        assert_eq!(pad.id(), DeviceId(4));
        assert_eq!(pad.id().to_string(), "#4");
    }
}

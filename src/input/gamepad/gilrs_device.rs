//! [`GamepadDevice`] backed by a gilrs gamepad

use gilrs::{GamepadId, Gilrs};
use std::cell::RefCell;
use std::rc::Rc;

use super::buttons::{STANDARD_AXES, STANDARD_BUTTONS};
use super::device::{DeviceId, DeviceSnapshot, GamepadDevice};

/// Gilrs gamepad exposed in the standard layout
///
/// Readings come from gilrs' cached gamepad state, which the provider keeps
/// current by draining `Gilrs::next_event` before each frame.
pub struct GilrsDevice {
    gilrs: Rc<RefCell<Gilrs>>,
    id: GamepadId,
    name: String,
}

impl GilrsDevice {
    pub fn new(gilrs: Rc<RefCell<Gilrs>>, id: GamepadId, name: String) -> Self {
        Self { gilrs, id, name }
    }
}

/// Crate-level identity of a gilrs gamepad
pub fn device_id(id: GamepadId) -> DeviceId {
    DeviceId(usize::from(id))
}

impl GamepadDevice for GilrsDevice {
    fn id(&self) -> DeviceId {
        device_id(self.id)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn button_count(&self) -> usize {
        STANDARD_BUTTONS.len()
    }

    fn axis_count(&self) -> usize {
        STANDARD_AXES.len()
    }

    fn snapshot(&self) -> DeviceSnapshot {
        let gilrs = self.gilrs.borrow();
        // Gone before the disconnect event was processed: read as idle
        let Some(gamepad) = gilrs.connected_gamepad(self.id) else {
            return DeviceSnapshot::default();
        };

        DeviceSnapshot::new(
            STANDARD_BUTTONS.iter().map(|b| gamepad.is_pressed(*b)).collect(),
            STANDARD_AXES
                .iter()
                .map(|a| a.orient(gamepad.value(a.axis)))
                .collect(),
        )
    }
}

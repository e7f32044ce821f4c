//! Standard gamepad layout for gilrs controllers
//!
//! gilrs reports buttons by physical position. The tracker works on plain
//! indices, so gilrs devices are exposed in the standard gamepad order:
//!
//! ```text
//!  0 South   1 East    2 West    3 North
//!  4 LB      5 RB      6 LT      7 RT
//!  8 Select  9 Start  10 L3     11 R3
//! 12 Up     13 Down   14 Left   15 Right   16 Mode
//! ```
//!
//! Axes are `0 LX, 1 LY, 2 RX, 3 RY` with "down" and "right" positive, so the
//! Y axes are inverted relative to gilrs.

use gilrs::{Axis, Button};

/// Button index → gilrs button
pub const STANDARD_BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

const BUTTON_NAMES: [&str; 17] = [
    "south", "east", "west", "north", "lb", "rb", "lt", "rt", "select", "start", "l3", "r3",
    "dpad.up", "dpad.down", "dpad.left", "dpad.right", "mode",
];

/// One axis of the standard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardAxis {
    pub axis: Axis,
    pub inverted: bool,
    pub name: &'static str,
}

impl StandardAxis {
    /// Convert a gilrs reading to the standard orientation
    pub fn orient(&self, value: f32) -> f32 {
        if self.inverted {
            -value
        } else {
            value
        }
    }
}

/// Axis index → gilrs axis
pub const STANDARD_AXES: [StandardAxis; 4] = [
    StandardAxis { axis: Axis::LeftStickX, inverted: false, name: "lx" },
    StandardAxis { axis: Axis::LeftStickY, inverted: true, name: "ly" },
    StandardAxis { axis: Axis::RightStickX, inverted: false, name: "rx" },
    StandardAxis { axis: Axis::RightStickY, inverted: true, name: "ry" },
];

/// Short name for a button index (e.g. `"south"`, `"dpad.up"`)
pub fn button_name(idx: usize) -> Option<&'static str> {
    BUTTON_NAMES.get(idx).copied()
}

/// Short name for an axis index (e.g. `"lx"`)
pub fn axis_name(idx: usize) -> Option<&'static str> {
    STANDARD_AXES.get(idx).map(|a| a.name)
}

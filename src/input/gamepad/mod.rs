//! Gamepad input: edge-triggered events from a frame-polled device
//!
//! [`InputStateTracker`] is the core. It is fed by any [`GamepadDevice`] and
//! driven by any [`FrameScheduler`]; the gilrs modules provide the real
//! device source and frame loop used by the binary.

pub mod analog;
pub mod buttons;
pub mod device;
pub mod events;
pub mod gilrs_device;
pub mod provider;
pub mod scheduler;
pub mod slot;
pub mod tracker;

pub use analog::DEFAULT_DEAD_ZONE;
pub use device::{DeviceId, DeviceSnapshot, GamepadDevice, VirtualGamepad};
pub use events::{AxeEvent, ButtonEvent, GamepadEvent, GamepadEventKind};
pub use provider::GilrsProvider;
pub use scheduler::{FrameCallback, FrameQueue, FrameScheduler, TickHandle};
pub use tracker::{InputStateTracker, TrackedState, TrackerConfig};

//! padwatch - frame-polled gamepad tracker
//!
//! Turns continuously polled gamepad readings into edge-triggered button and
//! axis events delivered through a typed event emitter.

pub mod config;
pub mod emitter;
pub mod error;
pub mod input;
pub mod plugin;

pub use emitter::{Event, EventEmitter, ListenOptions, Subscription};
pub use error::{ConfigError, PluginError, ProviderError};
pub use input::gamepad::{
    AxeEvent, ButtonEvent, DeviceId, DeviceSnapshot, FrameQueue, FrameScheduler, GamepadDevice,
    GamepadEvent, GamepadEventKind, InputStateTracker, TrackerConfig, VirtualGamepad,
};
pub use plugin::{GamepadPlugin, GamepadPluginOptions, PluginHost};

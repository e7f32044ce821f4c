//! Error types shared across the crate

use thiserror::Error;

/// Precondition failures raised by [`GamepadPlugin`](crate::plugin::GamepadPlugin)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    /// `start()` was called before the plugin was bound to a host
    #[error("plugin host is not initialized")]
    HostNotInitialized,

    /// The host exists but has not signalled readiness yet
    #[error("plugin host \"{0}\" is not ready")]
    HostNotReady(String),
}

/// Unknown event name passed to [`GamepadEventKind::from_str`](crate::input::gamepad::GamepadEventKind)
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gamepad event \"{0}\"")]
pub struct ParseEventKindError(pub String);

/// Semantic validation errors for [`GamepadConfig`](crate::config::GamepadConfig)
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("dead_zone must be within [0, 1), got {0}")]
    InvalidDeadZone(f32),

    #[error("frame_rate_hz must be greater than zero")]
    ZeroFrameRate,
}

/// Failures while bringing up the gilrs backend
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("gilrs initialization failed: {0}")]
    Gilrs(String),
}

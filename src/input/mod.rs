//! Input devices

pub mod gamepad;

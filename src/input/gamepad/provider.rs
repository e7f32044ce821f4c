//! gilrs gamepad provider with hot-plug support
//!
//! Owns the gilrs context and the frame loop. Each frame it drains gilrs'
//! event queue, turns connection changes into attach/detach signals for the
//! plugin, then runs the [`FrameQueue`] so the tracker's poll step executes.

use gilrs::{Event, EventType, GamepadId, Gilrs};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::device::DeviceId;
use super::gilrs_device::{device_id, GilrsDevice};
use super::scheduler::FrameQueue;
use super::slot::DeviceSlot;
use crate::config::GamepadConfig;
use crate::error::ProviderError;
use crate::plugin::{GamepadPlugin, PluginHost};

/// Connection change read from the gilrs event queue
#[derive(Debug, Clone, PartialEq, Eq)]
enum Connection {
    Connected(GamepadId, String),
    Disconnected(GamepadId),
}

pub struct GilrsProvider {
    gilrs: Rc<RefCell<Gilrs>>,
    slot: DeviceSlot,
    frames: Rc<FrameQueue>,
    frame_interval: Duration,
}

impl GilrsProvider {
    /// Initialize gilrs
    ///
    /// # Arguments
    /// * `config` - Gamepad configuration (product match, frame rate)
    /// * `frames` - Frame queue the plugin's tracker schedules on
    pub fn new(config: &GamepadConfig, frames: Rc<FrameQueue>) -> Result<Self, ProviderError> {
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                debug!("gilrs initialized");
                g
            },
            Err(e) => {
                warn!("Failed to initialize gilrs: {}", e);
                return Err(ProviderError::Gilrs(e.to_string()));
            },
        };

        Ok(Self {
            gilrs: Rc::new(RefCell::new(gilrs)),
            slot: DeviceSlot::new(config.product_match.clone()),
            frames,
            frame_interval: config.frame_interval(),
        })
    }

    /// Connected gamepads as `(id, name)`
    pub fn gamepads(&self) -> Vec<(DeviceId, String)> {
        let gilrs = self.gilrs.borrow();
        let gamepads = gilrs
            .gamepads()
            .filter(|(_, gp)| gp.is_connected())
            .map(|(id, gp)| (device_id(id), gp.name().to_string()))
            .collect();
        gamepads
    }

    /// Run the frame loop
    ///
    /// # Arguments
    /// * `plugin` - Initialized plugin receiving attach/detach signals
    /// * `max_frames` - Stop after this many frames; `None` runs forever
    pub fn run(&mut self, plugin: &GamepadPlugin, max_frames: Option<u64>) {
        self.attach_present(plugin);

        let mut last_frame = Instant::now();
        loop {
            if max_frames.is_some_and(|max| self.frames.frame() >= max) {
                info!("Frame limit reached after {} frames", self.frames.frame());
                break;
            }

            for change in self.drain_connection_events() {
                self.apply(change, plugin);
            }
            self.frames.run_frame();

            // Sleep to hold the configured frame rate
            let elapsed = last_frame.elapsed();
            if elapsed < self.frame_interval {
                std::thread::sleep(self.frame_interval - elapsed);
            }
            last_frame = Instant::now();
        }
    }

    /// Offer gamepads that were connected before the loop started
    fn attach_present(&mut self, plugin: &GamepadPlugin) {
        let present: Vec<(GamepadId, String)> = {
            let gilrs = self.gilrs.borrow();
            let present = gilrs
                .gamepads()
                .filter(|(_, gp)| gp.is_connected())
                .map(|(id, gp)| (id, gp.name().to_string()))
                .collect();
            present
        };

        if present.is_empty() {
            warn!("No gamepads detected, waiting for a connection");
        }
        for (id, name) in present {
            self.apply(Connection::Connected(id, name), plugin);
        }
    }

    fn drain_connection_events(&mut self) -> Vec<Connection> {
        let mut gilrs = self.gilrs.borrow_mut();
        let mut changes = Vec::new();

        // Draining also refreshes gilrs' cached gamepad state
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => {
                    let name = gilrs.gamepad(id).name().to_string();
                    changes.push(Connection::Connected(id, name));
                },
                EventType::Disconnected => changes.push(Connection::Disconnected(id)),
                _ => {},
            }
        }

        changes
    }

    fn apply(&mut self, change: Connection, plugin: &GamepadPlugin) {
        match change {
            Connection::Connected(id, name) => {
                if self.slot.try_connect(device_id(id), &name) {
                    plugin.attach(Box::new(GilrsDevice::new(self.gilrs.clone(), id, name)));
                }
            },
            Connection::Disconnected(id) => {
                if self.slot.disconnect(device_id(id)) {
                    plugin.detach(device_id(id));
                }
            },
        }
    }
}

impl PluginHost for GilrsProvider {
    fn name(&self) -> &str {
        "gilrs"
    }

    /// gilrs is initialized by the time a provider exists
    fn is_ready(&self) -> bool {
        true
    }
}

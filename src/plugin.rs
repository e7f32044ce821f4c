//! Gamepad plugin
//!
//! Thin shell binding an [`InputStateTracker`] to a host application. The
//! host must be ready before the plugin starts polling; using the plugin
//! earlier is reported to the caller as a [`PluginError`].

use std::rc::Rc;
use tracing::{debug, info};

use crate::emitter::{ListenOptions, Subscription};
use crate::error::PluginError;
use crate::input::gamepad::{
    DeviceId, FrameScheduler, GamepadDevice, GamepadEvent, GamepadEventKind, InputStateTracker,
    TrackerConfig,
};

/// Application the plugin is registered with
pub trait PluginHost {
    fn name(&self) -> &str;

    /// Host readiness signal
    fn is_ready(&self) -> bool;
}

/// Options accepted by [`GamepadPlugin::create`]
pub type GamepadPluginOptions = TrackerConfig;

pub struct GamepadPlugin {
    host: Option<String>,
    tracker: InputStateTracker,
}

impl GamepadPlugin {
    pub fn create(scheduler: Rc<dyn FrameScheduler>, options: GamepadPluginOptions) -> Self {
        Self {
            host: None,
            tracker: InputStateTracker::new(scheduler, options),
        }
    }

    /// Bind to `host` and start polling
    ///
    /// # Errors
    /// [`PluginError::HostNotReady`] when the host has not signalled readiness
    pub fn init(&mut self, host: &dyn PluginHost) -> Result<(), PluginError> {
        if !host.is_ready() {
            return Err(PluginError::HostNotReady(host.name().to_string()));
        }
        debug!("Gamepad plugin bound to host \"{}\"", host.name());
        self.host = Some(host.name().to_string());
        self.on_init()
    }

    /// Begin polling
    ///
    /// # Errors
    /// [`PluginError::HostNotInitialized`] when called before [`GamepadPlugin::init`]
    pub fn start(&self) -> Result<(), PluginError> {
        self.on_init()
    }

    fn on_init(&self) -> Result<(), PluginError> {
        let Some(host) = &self.host else {
            return Err(PluginError::HostNotInitialized);
        };
        self.tracker.start();
        info!("Gamepad plugin started on \"{}\"", host);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.host.is_some()
    }

    pub fn is_button_pressed(&self, idx: usize) -> bool {
        self.tracker.is_button_pressed(idx)
    }

    pub fn on(
        &self,
        kind: GamepadEventKind,
        listener: impl Fn(&GamepadEvent) + 'static,
        options: ListenOptions,
    ) -> Subscription {
        self.tracker.on(kind, listener, options)
    }

    /// Forward the environment's device-attached signal
    pub fn attach(&self, device: Box<dyn GamepadDevice>) {
        self.tracker.attach(device);
    }

    /// Forward the environment's device-detached signal
    pub fn detach(&self, id: DeviceId) -> bool {
        self.tracker.detach(id)
    }

    pub fn tracker(&self) -> &InputStateTracker {
        &self.tracker
    }

    /// Uninstall polling and listeners and forget the host
    pub fn destroy(&mut self) {
        self.tracker.uninstall();
        if let Some(host) = self.host.take() {
            debug!("Gamepad plugin detached from host \"{}\"", host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::{FrameQueue, VirtualGamepad};
    use std::cell::Cell;

    struct TestHost {
        ready: bool,
    }

    impl PluginHost for TestHost {
        fn name(&self) -> &str {
            "test-host"
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    fn make_plugin() -> (Rc<FrameQueue>, GamepadPlugin) {
        let frames = Rc::new(FrameQueue::new());
        let plugin = GamepadPlugin::create(frames.clone(), GamepadPluginOptions::default());
        (frames, plugin)
    }

    #[test]
    fn test_start_before_init_fails() {
        let (frames, plugin) = make_plugin();
        assert_eq!(plugin.start(), Err(PluginError::HostNotInitialized));
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_init_with_unready_host_fails() {
        let (frames, mut plugin) = make_plugin();
        let err = plugin.init(&TestHost { ready: false }).unwrap_err();
        assert_eq!(err, PluginError::HostNotReady("test-host".to_string()));
        assert!(!plugin.is_initialized());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_init_starts_polling_and_forwards_events() {
        let (frames, mut plugin) = make_plugin();
        plugin.init(&TestHost { ready: true }).unwrap();
        assert_eq!(frames.pending(), 1);

        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        plugin.on(
            GamepadEventKind::ButtonPressed,
            move |_| h.set(h.get() + 1),
            ListenOptions::default(),
        );

        let pad = VirtualGamepad::new(0, "Pad", 3, 0);
        plugin.attach(Box::new(pad.clone()));
        pad.set_button(2, true);
        frames.run_frame();

        assert_eq!(hits.get(), 1);
        assert!(plugin.is_button_pressed(2));
        assert!(!plugin.is_button_pressed(99));
        assert!(plugin.start().is_ok());
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn test_destroy_uninstalls() {
        let (frames, mut plugin) = make_plugin();
        plugin.init(&TestHost { ready: true }).unwrap();
        plugin.attach(Box::new(VirtualGamepad::new(0, "Pad", 1, 1)));

        plugin.destroy();

        assert_eq!(frames.pending(), 0);
        assert!(!plugin.tracker().is_attached());
        assert_eq!(plugin.start(), Err(PluginError::HostNotInitialized));
    }
}

//! Input state tracker
//!
//! Keeps the last-seen button and axis state of exactly one gamepad and turns
//! each frame's raw readings into edge-triggered [`GamepadEvent`]s.
//!
//! The tracker is driven by an injected [`FrameScheduler`]: every poll step
//! reschedules itself, and a detach cancels the pending step. Everything runs
//! on one thread; the tracker is a cheap `Rc` handle so the provider, the
//! plugin and the scheduled callback can all refer to it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, trace};

use super::analog::{
    button_transition, classify_axis, AxisTransition, ButtonTransition, DEFAULT_DEAD_ZONE,
};
use super::device::{DeviceId, DeviceSnapshot, GamepadDevice};
use super::events::{AxeEvent, ButtonEvent, GamepadEvent, GamepadEventKind};
use super::scheduler::{FrameScheduler, TickHandle};
use crate::emitter::{EventEmitter, ListenOptions, Subscription};

/// Tuning for the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Axis magnitude treated as rest
    pub dead_zone: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }
}

/// Last-seen state, indexed like the device's own buttons and axes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedState {
    pub button_states: Vec<bool>,
    pub axe_values: Vec<f32>,
}

impl TrackedState {
    fn sized(button_count: usize, axis_count: usize) -> Self {
        Self {
            button_states: vec![false; button_count],
            axe_values: vec![0.0; axis_count],
        }
    }

    /// Diff `snapshot` against the stored state and store it
    ///
    /// Buttons come first in index order, then axes in index order.
    fn apply(&mut self, snapshot: &DeviceSnapshot, dead_zone: f32) -> Vec<GamepadEvent> {
        let mut events = Vec::new();

        for (idx, stored) in self.button_states.iter_mut().enumerate() {
            let pressed = snapshot.button(idx);
            match button_transition(*stored, pressed) {
                Some(ButtonTransition::Pressed) => {
                    events.push(GamepadEvent::ButtonPressed(ButtonEvent { idx }))
                },
                Some(ButtonTransition::Released) => {
                    events.push(GamepadEvent::ButtonReleased(ButtonEvent { idx }))
                },
                None => {},
            }
            *stored = pressed;
        }

        for (idx, stored) in self.axe_values.iter_mut().enumerate() {
            let value = snapshot.axis(idx);
            let payload = AxeEvent { idx, value };
            match classify_axis(*stored, value, dead_zone) {
                Some(AxisTransition::Released) => events.push(GamepadEvent::AxeReleased(payload)),
                Some(AxisTransition::Pushed) => events.push(GamepadEvent::AxePushed(payload)),
                Some(AxisTransition::ValueUpdated) => {
                    events.push(GamepadEvent::AxeValueUpdated(payload))
                },
                None => {},
            }
            *stored = value;
        }

        events
    }
}

struct AttachedDevice {
    device: Box<dyn GamepadDevice>,
    state: TrackedState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polling {
    /// Nothing scheduled
    Idle,
    /// A poll step waits for the next frame
    Pending { handle: TickHandle, generation: u64 },
    /// Inside a poll step
    Running,
}

struct TrackerInner {
    config: TrackerConfig,
    scheduler: Rc<dyn FrameScheduler>,
    emitter: EventEmitter<GamepadEvent>,
    device: RefCell<Option<AttachedDevice>>,
    polling: Cell<Polling>,
    /// `start()` was called and not undone by `uninstall()`
    requested: Cell<bool>,
    generation: Cell<u64>,
}

/// Per-device tracker emitting edge-triggered gamepad events
#[derive(Clone)]
pub struct InputStateTracker {
    inner: Rc<TrackerInner>,
}

impl InputStateTracker {
    pub fn new(scheduler: Rc<dyn FrameScheduler>, config: TrackerConfig) -> Self {
        Self {
            inner: Rc::new(TrackerInner {
                config,
                scheduler,
                emitter: EventEmitter::new(),
                device: RefCell::new(None),
                polling: Cell::new(Polling::Idle),
                requested: Cell::new(false),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn config(&self) -> TrackerConfig {
        self.inner.config
    }

    /// Device-attached signal
    ///
    /// Sizes the tracked state from the device's counts. Replaces any device
    /// already attached. Polling starts now if it was requested earlier.
    /// Called from a listener, it ends the running poll step: the rest of the
    /// replaced device's events for that frame are dropped.
    pub fn attach(&self, device: Box<dyn GamepadDevice>) {
        let state = TrackedState::sized(device.button_count(), device.axis_count());
        info!(
            "Gamepad {} attached: \"{}\" ({} buttons, {} axes)",
            device.id(),
            device.name(),
            state.button_states.len(),
            state.axe_values.len()
        );

        if let Some(previous) = self
            .inner
            .device
            .replace(Some(AttachedDevice { device, state }))
        {
            debug!("Replacing previously attached gamepad {}", previous.device.id());
        }

        if self.inner.polling.get() == Polling::Running {
            self.inner.polling.set(Polling::Idle);
        }
        if self.inner.requested.get() && self.inner.polling.get() == Polling::Idle {
            self.schedule_tick();
        }
    }

    /// Device-detached signal
    ///
    /// Cancels the pending poll step and clears all tracked state. Signals for
    /// a device other than the attached one are ignored.
    ///
    /// # Returns
    /// `true` if the attached device was removed
    pub fn detach(&self, id: DeviceId) -> bool {
        let attached_id = self.inner.device.borrow().as_ref().map(|a| a.device.id());
        match attached_id {
            Some(current) if current == id => {},
            Some(current) => {
                debug!("Ignoring detach of gamepad {} (attached: {})", id, current);
                return false;
            },
            None => {
                debug!("Ignoring detach of gamepad {} (nothing attached)", id);
                return false;
            },
        }

        self.halt_polling();
        if let Some(previous) = self.inner.device.take() {
            info!("Gamepad {} detached: \"{}\"", id, previous.device.name());
        }
        true
    }

    /// Request polling from the next frame boundary
    ///
    /// Idempotent. Without an attached device each poll step is a no-op that
    /// only reschedules itself.
    pub fn start(&self) {
        self.inner.requested.set(true);
        if self.inner.polling.get() == Polling::Idle {
            debug!("Gamepad polling started");
            self.schedule_tick();
        }
    }

    /// Owner teardown: stop polling, drop the device and every listener
    pub fn uninstall(&self) {
        self.inner.requested.set(false);
        self.halt_polling();
        self.inner.device.replace(None);
        self.inner.emitter.un_all();
        debug!("Gamepad tracker uninstalled");
    }

    /// Last observed pressed state; `false` when out of range or detached
    pub fn is_button_pressed(&self, idx: usize) -> bool {
        self.inner
            .device
            .borrow()
            .as_ref()
            .and_then(|a| a.state.button_states.get(idx).copied())
            .unwrap_or(false)
    }

    /// Last observed axis value; `None` when out of range or detached
    pub fn axis_value(&self, idx: usize) -> Option<f32> {
        self.inner
            .device
            .borrow()
            .as_ref()
            .and_then(|a| a.state.axe_values.get(idx).copied())
    }

    pub fn is_attached(&self) -> bool {
        self.inner.device.borrow().is_some()
    }

    pub fn attached_id(&self) -> Option<DeviceId> {
        self.inner.device.borrow().as_ref().map(|a| a.device.id())
    }

    pub fn device_name(&self) -> Option<String> {
        self.inner
            .device
            .borrow()
            .as_ref()
            .map(|a| a.device.name().to_string())
    }

    /// Whether a poll step is waiting for the next frame
    pub fn is_polling(&self) -> bool {
        matches!(self.inner.polling.get(), Polling::Pending { .. })
    }

    /// Copy of the tracked state (empty when detached)
    pub fn state(&self) -> TrackedState {
        self.inner
            .device
            .borrow()
            .as_ref()
            .map(|a| a.state.clone())
            .unwrap_or_default()
    }

    /// Subscribe to one event kind
    pub fn on(
        &self,
        kind: GamepadEventKind,
        listener: impl Fn(&GamepadEvent) + 'static,
        options: ListenOptions,
    ) -> Subscription {
        self.inner.emitter.on(kind, listener, options)
    }

    pub fn once(
        &self,
        kind: GamepadEventKind,
        listener: impl Fn(&GamepadEvent) + 'static,
    ) -> Subscription {
        self.inner.emitter.once(kind, listener)
    }

    pub fn emitter(&self) -> &EventEmitter<GamepadEvent> {
        &self.inner.emitter
    }

    fn schedule_tick(&self) {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);

        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                InputStateTracker { inner }.poll(generation);
            }
        }));
        self.inner
            .polling
            .set(Polling::Pending { handle, generation });
    }

    fn halt_polling(&self) {
        if let Polling::Pending { handle, .. } = self.inner.polling.get() {
            self.inner.scheduler.cancel(handle);
            trace!("Cancelled pending gamepad tick");
        }
        self.inner.polling.set(Polling::Idle);
    }

    /// One poll step
    ///
    /// The frame's events are computed and the tracked state committed before
    /// the first listener runs, so a `button-pressed` listener already sees
    /// `is_button_pressed(idx) == true`. Emission stops early when a listener
    /// detaches, attaches or uninstalls; the next step is scheduled only if
    /// this one is still running at the end.
    fn poll(&self, generation: u64) {
        match self.inner.polling.get() {
            Polling::Pending { generation: g, .. } if g == generation => {},
            _ => {
                trace!("Ignoring stale gamepad tick");
                return;
            },
        }
        self.inner.polling.set(Polling::Running);

        let events = self.collect_events();
        for event in &events {
            // A listener swapped or detached the device, or uninstalled
            if self.inner.polling.get() != Polling::Running {
                break;
            }
            trace!("Gamepad event: {:?}", event);
            self.inner.emitter.emit(event);
        }

        if self.inner.polling.get() == Polling::Running {
            self.schedule_tick();
        }
    }

    fn collect_events(&self) -> Vec<GamepadEvent> {
        let mut slot = self.inner.device.borrow_mut();
        let Some(attached) = slot.as_mut() else {
            return Vec::new();
        };
        let snapshot = attached.device.snapshot();
        attached.state.apply(&snapshot, self.inner.config.dead_zone)
    }
}

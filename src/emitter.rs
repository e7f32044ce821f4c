//! Generic typed event emitter
//!
//! Listeners are registered per event kind and invoked synchronously, in
//! registration order, from the thread that calls [`EventEmitter::emit`].
//! Everything here is single-threaded (`Rc`/`RefCell`); components that need
//! pub/sub hold an emitter rather than inheriting from one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

/// An event value that can be routed by kind
pub trait Event: 'static {
    /// Key listeners subscribe with (e.g. `"button-pressed"`)
    type Kind: Copy + Eq + Hash + fmt::Debug + 'static;

    fn kind(&self) -> Self::Kind;
}

/// Callback type for emitted events
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Options for [`EventEmitter::on`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// Remove the listener after its first invocation
    pub once: bool,
}

impl ListenOptions {
    /// Options for a one-shot listener
    pub fn once() -> Self {
        Self { once: true }
    }
}

struct ListenerEntry<E> {
    id: u64,
    once: bool,
    callback: Listener<E>,
}

struct Registry<E: Event> {
    next_id: u64,
    listeners: HashMap<E::Kind, Vec<ListenerEntry<E>>>,
}

impl<E: Event> Registry<E> {
    fn contains(&self, kind: E::Kind, id: u64) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|entries| entries.iter().any(|e| e.id == id))
    }

    /// Claim a listener for one invocation
    ///
    /// Returns `false` if the listener is no longer registered. A one-shot
    /// listener leaves the registry here, before it runs.
    fn claim(&mut self, kind: E::Kind, id: u64, once: bool) -> bool {
        if !self.contains(kind, id) {
            return false;
        }
        if once {
            self.remove(kind, id);
        }
        true
    }

    fn remove(&mut self, kind: E::Kind, id: u64) {
        if let Some(entries) = self.listeners.get_mut(&kind) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                self.listeners.remove(&kind);
            }
        }
    }
}

/// Handle returned by [`EventEmitter::on`]
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the listener. Safe to call after the emitter is gone.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Typed publish/subscribe registry
pub struct EventEmitter<E: Event> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: Event> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: HashMap::new(),
            })),
        }
    }

    /// Register a listener for `kind`
    pub fn on(
        &self,
        kind: E::Kind,
        listener: impl Fn(&E) + 'static,
        options: ListenOptions,
    ) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.entry(kind).or_default().push(ListenerEntry {
                id,
                once: options.once,
                callback: Rc::new(listener),
            });
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().remove(kind, id);
                }
            })),
        }
    }

    /// Register a listener that runs at most once
    pub fn once(&self, kind: E::Kind, listener: impl Fn(&E) + 'static) -> Subscription {
        self.on(kind, listener, ListenOptions::once())
    }

    /// Invoke every listener registered for the event's kind
    ///
    /// Listeners may subscribe, unsubscribe or emit from inside the callback.
    /// A listener removed by an earlier listener during the same emission is
    /// skipped, one-shot or not. Listeners added during emission first run on
    /// the next emit.
    pub fn emit(&self, event: &E) {
        let kind = event.kind();
        let batch: Vec<(u64, bool, Listener<E>)> = {
            let registry = self.registry.borrow();
            let Some(entries) = registry.listeners.get(&kind) else {
                return;
            };
            entries
                .iter()
                .map(|e| (e.id, e.once, e.callback.clone()))
                .collect()
        };

        for (id, once, callback) in batch {
            if !self.registry.borrow_mut().claim(kind, id, once) {
                continue;
            }
            callback(event);
        }
    }

    /// Remove every listener of every kind
    pub fn un_all(&self) {
        self.registry.borrow_mut().listeners.clear();
    }

    /// Number of listeners currently registered for `kind`
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, |entries| entries.len())
    }
}

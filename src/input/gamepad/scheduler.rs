//! Frame scheduling primitive
//!
//! The tracker never owns a timer. It asks an injected [`FrameScheduler`] to
//! run its poll step on the next frame and cancels that request on detach.
//! [`FrameQueue`] is the manual implementation: whoever owns the frame loop
//! (the gilrs provider, or a test) calls [`FrameQueue::run_frame`] once per
//! rendered frame.

use std::cell::{Cell, RefCell};
use tracing::trace;

/// Identifies one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Callback run on the next frame boundary
pub type FrameCallback = Box<dyn FnOnce()>;

/// `schedule → run → reschedule` primitive, one callback per request
pub trait FrameScheduler {
    /// Run `callback` once, on the next frame
    fn schedule(&self, callback: FrameCallback) -> TickHandle;

    /// Drop a scheduled callback. Unknown or already-run handles are ignored.
    fn cancel(&self, handle: TickHandle);
}

/// Manually driven frame scheduler
#[derive(Default)]
pub struct FrameQueue {
    next_handle: Cell<u64>,
    pending: RefCell<Vec<(TickHandle, FrameCallback)>>,
    frames: Cell<u64>,
    cancellations: Cell<u64>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was pending when the frame began
    ///
    /// Callbacks scheduled while the frame runs wait for the next frame.
    /// Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        self.frames.set(self.frames.get() + 1);
        let due: Vec<TickHandle> = self.pending.borrow().iter().map(|(h, _)| *h).collect();

        let mut ran = 0;
        for handle in due {
            // A callback earlier in this frame may have cancelled this one
            let entry = {
                let mut pending = self.pending.borrow_mut();
                pending
                    .iter()
                    .position(|(h, _)| *h == handle)
                    .map(|pos| pending.remove(pos))
            };
            if let Some((_, callback)) = entry {
                callback();
                ran += 1;
            }
        }

        trace!(frame = self.frames.get(), ran, "frame complete");
        ran
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frames.get()
    }

    /// Successful `cancel` calls so far
    pub fn cancellations(&self) -> u64 {
        self.cancellations.get()
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule(&self, callback: FrameCallback) -> TickHandle {
        let handle = TickHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel(&self, handle: TickHandle) {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|(h, _)| *h != handle);
        if pending.len() != before {
            self.cancellations.set(self.cancellations.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_run_on_next_frame_only() {
        let queue = Rc::new(FrameQueue::new());
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        queue.schedule(Box::new(move || h.set(h.get() + 1)));
        assert_eq!(queue.pending(), 1);
        assert_eq!(hits.get(), 0);

        assert_eq!(queue.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(queue.run_frame(), 0);
        assert_eq!(queue.frame(), 2);
    }

    #[test]
    fn test_reschedule_from_callback_waits_a_frame() {
        let queue = Rc::new(FrameQueue::new());
        let hits = Rc::new(Cell::new(0));

        let q = Rc::downgrade(&queue);
        let h = hits.clone();
        queue.schedule(Box::new(move || {
            h.set(h.get() + 1);
            if let Some(queue) = q.upgrade() {
                let h = h.clone();
                queue.schedule(Box::new(move || h.set(h.get() + 1)));
            }
        }));

        queue.run_frame();
        assert_eq!(hits.get(), 1);
        assert_eq!(queue.pending(), 1);
        queue.run_frame();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_cancel() {
        let queue = FrameQueue::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let handle = queue.schedule(Box::new(move || h.set(h.get() + 1)));
        queue.cancel(handle);
        queue.cancel(handle);

        assert_eq!(queue.cancellations(), 1);
        assert_eq!(queue.run_frame(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_cancel_within_frame_skips_later_callback() {
        let queue = Rc::new(FrameQueue::new());
        let hits = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        let q = Rc::downgrade(&queue);
        let v = victim.clone();
        queue.schedule(Box::new(move || {
            if let (Some(queue), Some(handle)) = (q.upgrade(), v.get()) {
                queue.cancel(handle);
            }
        }));
        let h = hits.clone();
        victim.set(Some(queue.schedule(Box::new(move || h.set(h.get() + 1)))));

        assert_eq!(queue.run_frame(), 1);
        assert_eq!(hits.get(), 0);
    }
}

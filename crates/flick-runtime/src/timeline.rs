use crate::frame_clock::FrameClock;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

pub(crate) struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TimelineInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
}

impl TimelineInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut queue = self.frame_callbacks.borrow_mut();
        if let Some(index) = queue.iter().position(|entry| entry.id == id) {
            queue.remove(index);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Pop everything first so callbacks registered (or cancelled) while
        // draining land in the next drain, not this one.
        let mut queue = self.frame_callbacks.borrow_mut();
        let mut due = Vec::with_capacity(queue.len());
        while let Some(mut entry) = queue.pop_front() {
            if let Some(callback) = entry.callback.take() {
                due.push(callback);
            }
        }
        drop(queue);
        for callback in due {
            callback(frame_time_nanos);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }
}

/// Owner of the frame callback queue. Hosts hold the `Timeline` and hand
/// [`TimelineHandle`]s to everything that schedules timed work.
#[derive(Clone)]
pub struct Timeline {
    inner: Rc<TimelineInner>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(TimelineInner::new()),
        }
    }

    pub fn handle(&self) -> TimelineHandle {
        TimelineHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs every callback registered before this call with the given frame
    /// timestamp. Timestamps must be monotonic across drains.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak handle to a [`Timeline`]. Operations become no-ops once the owner
/// is dropped.
#[derive(Clone)]
pub struct TimelineHandle {
    inner: Weak<TimelineInner>,
}

impl TimelineHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

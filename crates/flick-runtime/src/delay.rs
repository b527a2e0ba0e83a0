//! Cancellable one-shot timer driven by the frame timeline.

use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
use crate::timeline::TimelineHandle;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Re-arms itself each frame until the deadline passes, then fires once.
/// This is called recursively to keep the timer alive across frames.
fn schedule_next_frame<F>(
    state: Rc<RefCell<Option<DelayState>>>,
    frame_clock: FrameClock,
    on_done: F,
) where
    F: FnOnce() + 'static,
{
    let state_for_closure = state.clone();
    let frame_clock_for_closure = frame_clock.clone();
    let on_done = RefCell::new(Some(on_done));

    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        let fired = {
            let state_guard = state_for_closure.borrow();
            let Some(delay_state) = state_guard.as_ref() else {
                return;
            };

            if !delay_state.is_pending.get() {
                return;
            }

            let start_time = match delay_state.start_frame_time_nanos.get() {
                Some(value) => value,
                None => {
                    delay_state
                        .start_frame_time_nanos
                        .set(Some(frame_time_nanos));
                    frame_time_nanos
                }
            };

            let elapsed = frame_time_nanos.saturating_sub(start_time);
            if elapsed >= delay_state.duration_nanos {
                delay_state.is_pending.set(false);
                true
            } else {
                false
            }
        };

        if fired {
            state_for_closure.borrow_mut().take();
            if let Some(done_fn) = on_done.borrow_mut().take() {
                done_fn();
            }
        } else if let Some(done_fn) = on_done.borrow_mut().take() {
            schedule_next_frame(
                state_for_closure.clone(),
                frame_clock_for_closure.clone(),
                done_fn,
            );
        }
    });

    // The registration has to outlive this call or the callback is dropped
    // from the queue before the next drain.
    if let Some(delay_state) = state.borrow_mut().as_mut() {
        delay_state.registration = Some(registration);
    }
}

struct DelayState {
    /// Frame time when the delay was first driven (set on the first frame).
    start_frame_time_nanos: Cell<Option<u64>>,
    /// How long to wait before firing.
    duration_nanos: u64,
    /// Current frame callback registration (kept alive to continue waiting).
    registration: Option<FrameCallbackRegistration>,
    /// Whether the delay is still waiting to fire.
    is_pending: Cell<bool>,
}

/// One-shot frame-driven timer.
///
/// Starting a new delay cancels any delay already pending on this instance.
/// A cancelled delay never fires its callback.
pub struct Delay {
    state: Rc<RefCell<Option<DelayState>>>,
    frame_clock: FrameClock,
}

impl Delay {
    pub fn new(timeline: TimelineHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            frame_clock: FrameClock::new(timeline),
        }
    }

    /// Arms the timer to fire `on_done` once at least `duration_ms` of frame
    /// time has passed. The deadline is measured from the first frame after
    /// this call, not from the call itself.
    pub fn start<F>(&self, duration_ms: u64, on_done: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let delay_state = DelayState {
            start_frame_time_nanos: Cell::new(None),
            duration_nanos: duration_ms * 1_000_000,
            registration: None,
            is_pending: Cell::new(true),
        };

        *self.state.borrow_mut() = Some(delay_state);

        schedule_next_frame(self.state.clone(), self.frame_clock.clone(), on_done);
    }

    pub fn cancel(&self) {
        if let Some(state) = self.state.borrow_mut().take() {
            // A callback already popped for this drain checks is_pending
            // and bows out; dropping the registration covers the rest.
            state.is_pending.set(false);
            drop(state.registration);
        }
    }

    /// Returns true while the timer is armed and has not fired.
    pub fn is_pending(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|s| s.is_pending.get())
    }
}

impl Clone for Delay {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            frame_clock: self.frame_clock.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/delay_tests.rs"]
mod tests;

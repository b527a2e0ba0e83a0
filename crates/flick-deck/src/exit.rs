//! Exit animation as an explicit, cancellable task.

use flick_gesture::ExitDirection;
use flick_runtime::FrameCallbackRegistration;
use std::cell::Cell;

/// One card's exit in flight. Owns its frame callback registration, so
/// dropping the animation (on cancel or completion) also removes whatever
/// it still has pending on the timeline.
pub struct ExitAnimation {
    direction: ExitDirection,
    duration_nanos: u64,
    /// Frame time when the animation was first driven (set on the first frame).
    start_frame_time_nanos: Cell<Option<u64>>,
    progress: Cell<f32>,
    registration: Option<FrameCallbackRegistration>,
}

impl ExitAnimation {
    pub(crate) fn new(direction: ExitDirection, duration_millis: u64) -> Self {
        Self {
            direction,
            duration_nanos: duration_millis * 1_000_000,
            start_frame_time_nanos: Cell::new(None),
            progress: Cell::new(0.0),
            registration: None,
        }
    }

    pub fn direction(&self) -> ExitDirection {
        self.direction
    }

    /// Completed fraction of the exit, in [0.0, 1.0].
    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub(crate) fn set_registration(&mut self, registration: FrameCallbackRegistration) {
        self.registration = Some(registration);
    }

    /// Advances the animation to `frame_time_nanos`; the first frame seeds
    /// the start time. Returns true once the full duration has elapsed.
    pub(crate) fn drive(&self, frame_time_nanos: u64) -> bool {
        let start_time = match self.start_frame_time_nanos.get() {
            Some(value) => value,
            None => {
                self.start_frame_time_nanos.set(Some(frame_time_nanos));
                frame_time_nanos
            }
        };

        let elapsed = frame_time_nanos.saturating_sub(start_time);
        let linear_progress = if self.duration_nanos == 0 {
            1.0
        } else {
            (elapsed as f32 / self.duration_nanos as f32).clamp(0.0, 1.0)
        };
        self.progress.set(linear_progress);

        elapsed >= self.duration_nanos
    }
}

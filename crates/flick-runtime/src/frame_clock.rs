use crate::timeline::{FrameCallbackId, TimelineHandle};

/// Cloneable scheduler for one-shot frame callbacks.
#[derive(Clone)]
pub struct FrameClock {
    timeline: TimelineHandle,
}

impl FrameClock {
    pub fn new(timeline: TimelineHandle) -> Self {
        Self { timeline }
    }

    pub fn timeline_handle(&self) -> TimelineHandle {
        self.timeline.clone()
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut callback_opt = Some(callback);
        let timeline = self.timeline.clone();
        match timeline.register_frame_callback(move |time| {
            if let Some(callback) = callback_opt.take() {
                callback(time);
            }
        }) {
            Some(id) => FrameCallbackRegistration::new(timeline, id),
            None => FrameCallbackRegistration::inactive(timeline),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }
}

/// Keeps a registered frame callback alive; dropping (or calling
/// [`cancel`](Self::cancel)) removes the callback from the queue.
pub struct FrameCallbackRegistration {
    timeline: TimelineHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(timeline: TimelineHandle, id: FrameCallbackId) -> Self {
        Self {
            timeline,
            id: Some(id),
        }
    }

    fn inactive(timeline: TimelineHandle) -> Self {
        Self { timeline, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.timeline.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.timeline.cancel_frame_callback(id);
        }
    }
}

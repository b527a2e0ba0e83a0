//! Drag tracking state machine feeding the classifier.

use crate::classifier;
use crate::config::SWIPE_DISTANCE_THRESHOLD;
use crate::types::{GestureResult, SwipeDirection, TouchPoint};
use log::{debug, trace};
use std::rc::Rc;

/// Observer slots for tracker consumers. Every slot is independent and
/// optional; unset slots cost nothing at dispatch time.
#[derive(Clone, Default)]
pub struct SwipeObservers {
    pub on_start: Option<Rc<dyn Fn(TouchPoint)>>,
    pub on_move: Option<Rc<dyn Fn(TouchPoint, f32, f32)>>,
    pub on_end: Option<Rc<dyn Fn(&GestureResult)>>,
    pub on_swipe_left: Option<Rc<dyn Fn()>>,
    pub on_swipe_right: Option<Rc<dyn Fn()>>,
    pub on_swipe_up: Option<Rc<dyn Fn()>>,
    pub on_swipe_down: Option<Rc<dyn Fn()>>,
}

impl SwipeObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, callback: impl Fn(TouchPoint) + 'static) -> Self {
        self.on_start = Some(Rc::new(callback));
        self
    }

    pub fn on_move(mut self, callback: impl Fn(TouchPoint, f32, f32) + 'static) -> Self {
        self.on_move = Some(Rc::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl Fn(&GestureResult) + 'static) -> Self {
        self.on_end = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe_left(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_swipe_left = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe_right(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_swipe_right = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe_up(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_swipe_up = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe_down(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_swipe_down = Some(Rc::new(callback));
        self
    }
}

/// Tracks one drag at a time: idle until [`begin`](Self::begin), tracking
/// until [`finish`](Self::finish). Out-of-order input never panics; a
/// `begin` while tracking and an `update` or `finish` while idle are
/// no-ops.
pub struct SwipeTracker {
    threshold: f32,
    active: bool,
    start: Option<TouchPoint>,
    current: Option<TouchPoint>,
    delta_x: f32,
    delta_y: f32,
    observers: SwipeObservers,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_DISTANCE_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            active: false,
            start: None,
            current: None,
            delta_x: 0.0,
            delta_y: 0.0,
            observers: SwipeObservers::default(),
        }
    }

    pub fn set_observers(&mut self, observers: SwipeObservers) {
        self.observers = observers;
    }

    pub fn begin(&mut self, point: TouchPoint) {
        if self.active {
            trace!("begin ignored, already tracking");
            return;
        }
        self.active = true;
        self.start = Some(point);
        self.current = Some(point);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        if let Some(on_start) = &self.observers.on_start {
            on_start(point);
        }
    }

    pub fn update(&mut self, point: TouchPoint) {
        if !self.active {
            trace!("update ignored, tracker idle");
            return;
        }
        let Some(start) = self.start else {
            return;
        };
        self.current = Some(point);
        self.delta_x = point.position.x - start.position.x;
        self.delta_y = point.position.y - start.position.y;
        if let Some(on_move) = &self.observers.on_move {
            on_move(point, self.delta_x, self.delta_y);
        }
    }

    /// Ends the drag and classifies it. Always resets the tracker to idle;
    /// returns `None` (and fires nothing) when there was no drag to end, so
    /// a second `finish` in a row is harmless.
    pub fn finish(&mut self) -> Option<GestureResult> {
        let was_active = self.active;
        let start = self.start;
        let current = self.current;
        self.reset();

        if !was_active {
            return None;
        }
        let (Some(start), Some(current)) = (start, current) else {
            return None;
        };

        let result = classifier::classify(start, current, self.threshold);
        debug!(
            "swipe ended: direction={:?} distance={:.1} velocity={:.3}",
            result.direction, result.distance, result.velocity
        );

        if let Some(on_end) = &self.observers.on_end {
            on_end(&result);
        }
        match result.direction {
            Some(SwipeDirection::Left) => {
                if let Some(on_swipe_left) = &self.observers.on_swipe_left {
                    on_swipe_left();
                }
            }
            Some(SwipeDirection::Right) => {
                if let Some(on_swipe_right) = &self.observers.on_swipe_right {
                    on_swipe_right();
                }
            }
            Some(SwipeDirection::Up) => {
                if let Some(on_swipe_up) = &self.observers.on_swipe_up {
                    on_swipe_up();
                }
            }
            Some(SwipeDirection::Down) => {
                if let Some(on_swipe_down) = &self.observers.on_swipe_down {
                    on_swipe_down();
                }
            }
            None => {}
        }

        Some(result)
    }

    /// Returns the tracker to idle without classifying the drag or firing
    /// any observer. For owners that take the card away mid-gesture.
    pub fn reset(&mut self) {
        self.active = false;
        self.start = None;
        self.current = None;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
    }

    pub fn is_tracking(&self) -> bool {
        self.active
    }

    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    pub fn delta_y(&self) -> f32 {
        self.delta_y
    }

    pub fn start_point(&self) -> Option<TouchPoint> {
        self.start
    }

    pub fn current_point(&self) -> Option<TouchPoint> {
        self.current
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;

use flick_geometry::Point;

/// Snapshot of a pointer position at an instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub position: Point,
    pub timestamp_ms: u64,
}

impl TouchPoint {
    pub const fn new(position: Point, timestamp_ms: u64) -> Self {
        Self {
            position,
            timestamp_ms,
        }
    }

    pub const fn at(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            position: Point::new(x, y),
            timestamp_ms,
        }
    }
}

/// Dominant axis of a classified drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// The two ways a card can leave the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitDirection {
    Left,
    Right,
}

/// Classified summary of a completed drag. `direction` is `None` when the
/// total travel stayed below the classification threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureResult {
    pub direction: Option<SwipeDirection>,
    /// Straight-line distance from start to release, in logical pixels.
    pub distance: f32,
    /// Distance divided by elapsed time, in pixels per millisecond.
    pub velocity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// Transport-agnostic pointer event. Hosts translate whatever input source
/// they have (mouse, touch, synthetic traces) into these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub point: TouchPoint,
}

impl PointerEvent {
    pub const fn new(kind: PointerEventKind, point: TouchPoint) -> Self {
        Self { kind, point }
    }

    pub const fn down(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, TouchPoint::at(x, y, timestamp_ms))
    }

    pub const fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, TouchPoint::at(x, y, timestamp_ms))
    }

    pub const fn up(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, TouchPoint::at(x, y, timestamp_ms))
    }
}

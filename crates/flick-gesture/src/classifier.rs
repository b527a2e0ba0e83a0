//! Pure swipe kinematics.
//!
//! Every function here is stateless: inputs in, value out. The tracker and
//! the deck layer decide when to call them and what to do with the answers.

use crate::types::{ExitDirection, GestureResult, SwipeDirection, TouchPoint};

/// Where a mid-drag card sits and how far it is tilted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_degrees: f32,
}

/// Classifies a completed drag from its start and release snapshots.
///
/// Travel below `threshold` yields no direction. Otherwise the dominant
/// axis wins; an exact tie between the axes goes to the vertical branch.
/// Velocity divides by at least one millisecond so an instantaneous
/// release still produces a finite value.
pub fn classify(start: TouchPoint, end: TouchPoint, threshold: f32) -> GestureResult {
    let dx = end.position.x - start.position.x;
    let dy = end.position.y - start.position.y;
    let distance = start.position.distance_to(end.position);
    let elapsed_ms = end.timestamp_ms.saturating_sub(start.timestamp_ms).max(1);
    let velocity = distance / elapsed_ms as f32;

    let direction = if distance < threshold {
        None
    } else if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Some(SwipeDirection::Right)
        } else {
            Some(SwipeDirection::Left)
        }
    } else if dy > 0.0 {
        Some(SwipeDirection::Down)
    } else {
        Some(SwipeDirection::Up)
    };

    GestureResult {
        direction,
        distance,
        velocity,
    }
}

/// Card transform for the current drag offset.
///
/// Rotation grows linearly with horizontal travel and reaches
/// `max_rotation_degrees` at one full viewport width. It is not clamped;
/// drags wider than the viewport tilt past the maximum. Callers own
/// viewport sanity: a zero width produces a non-finite rotation.
pub fn exit_transform(
    delta_x: f32,
    delta_y: f32,
    viewport_width: f32,
    max_rotation_degrees: f32,
) -> ExitTransform {
    ExitTransform {
        translate_x: delta_x,
        translate_y: delta_y,
        rotation_degrees: delta_x / viewport_width * max_rotation_degrees,
    }
}

/// Card opacity for the current drag offset, fading from 1.0 at rest to
/// 0.3 at half the viewport width. Never drops below 0.3 so the card stays
/// legible mid-drag. A non-positive viewport width yields full opacity.
pub fn live_opacity(delta_x: f32, viewport_width: f32) -> f32 {
    let half_width = viewport_width / 2.0;
    if half_width <= 0.0 {
        return 1.0;
    }
    (1.0 - delta_x.abs() / half_width).clamp(0.3, 1.0)
}

/// Whether releasing now commits the swipe: either the card travelled far
/// enough horizontally, or the release was fast enough. Both comparisons
/// are strict, so landing exactly on a threshold does not commit.
pub fn should_commit(
    delta_x: f32,
    velocity: f32,
    distance_threshold: f32,
    velocity_threshold: f32,
) -> bool {
    delta_x.abs() > distance_threshold || velocity > velocity_threshold
}

/// Which side a committed card leaves through. Only a strictly positive
/// offset exits right; a release exactly at the origin exits left.
pub fn commit_direction(delta_x: f32) -> ExitDirection {
    if delta_x > 0.0 {
        ExitDirection::Right
    } else {
        ExitDirection::Left
    }
}

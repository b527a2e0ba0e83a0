//! Shared swipe thresholds for consistent gesture handling.
//!
//! All distances are in logical pixels, velocities in pixels per
//! millisecond. The classification threshold and the commit thresholds are
//! intentionally separate: a drag can be directional without being decisive.

/// Minimum drag distance before a gesture is classified as directional.
/// Below this the classifier reports no direction at all.
pub const SWIPE_DISTANCE_THRESHOLD: f32 = 50.0;

/// Horizontal travel past which releasing the card commits the swipe,
/// regardless of how slowly the drag was performed.
pub const COMMIT_DISTANCE_THRESHOLD: f32 = 100.0;

/// Release velocity past which the swipe commits even when the card has
/// barely moved. Lets a short, sharp flick dismiss a card.
pub const COMMIT_VELOCITY_THRESHOLD: f32 = 0.5;

/// Card tilt when the drag has travelled one full viewport width.
pub const MAX_ROTATION_DEGREES: f32 = 30.0;

/// Duration of the exit animation once a swipe commits.
pub const EXIT_ANIMATION_MILLIS: u64 = 300;

/// Tunable thresholds for one deck. [`Default`] mirrors the constants above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub swipe_distance_threshold: f32,
    pub commit_distance_threshold: f32,
    pub commit_velocity_threshold: f32,
    pub max_rotation_degrees: f32,
    pub exit_animation_millis: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            swipe_distance_threshold: SWIPE_DISTANCE_THRESHOLD,
            commit_distance_threshold: COMMIT_DISTANCE_THRESHOLD,
            commit_velocity_threshold: COMMIT_VELOCITY_THRESHOLD,
            max_rotation_degrees: MAX_ROTATION_DEGREES,
            exit_animation_millis: EXIT_ANIMATION_MILLIS,
        }
    }
}

impl SwipeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swipe_distance_threshold(mut self, threshold: f32) -> Self {
        self.swipe_distance_threshold = threshold;
        self
    }

    pub fn with_commit_distance_threshold(mut self, threshold: f32) -> Self {
        self.commit_distance_threshold = threshold;
        self
    }

    pub fn with_commit_velocity_threshold(mut self, threshold: f32) -> Self {
        self.commit_velocity_threshold = threshold;
        self
    }

    pub fn with_max_rotation_degrees(mut self, degrees: f32) -> Self {
        self.max_rotation_degrees = degrees;
        self
    }

    pub fn with_exit_animation_millis(mut self, millis: u64) -> Self {
        self.exit_animation_millis = millis;
        self
    }
}

//! Wall-clock source for hosts that drive the timeline in real time.
//!
//! The library itself never reads the wall clock. Tests and scripted runs
//! feed synthetic frame timestamps; a real host samples a [`Clock`] once
//! per frame and hands the elapsed nanoseconds to
//! [`Timeline::drain_frame_callbacks`](crate::Timeline::drain_frame_callbacks).

use web_time::Instant;

/// Provides timing information for timeline hosts.
pub trait Clock {
    /// Instant type produced by this clock implementation.
    type Instant: Copy;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;

    /// Returns the nanoseconds elapsed since `since`, saturating at
    /// `u64::MAX`. This is the unit the timeline consumes directly.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}

/// Clock backed by [`web_time`], which resolves to `std::time` everywhere
/// except wasm targets.
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

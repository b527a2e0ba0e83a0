//! Single-threaded frame timeline and timers for Flick
//!
//! Hosts drive the timeline by draining registered frame callbacks with a
//! monotonic frame timestamp. Everything timed in Flick (exit animations,
//! simulated latency) runs off this queue; there are no threads and no
//! wall-clock waits inside the library.

mod clock;
mod delay;
mod frame_clock;
mod timeline;

pub use clock::*;
pub use delay::*;
pub use frame_clock::*;
pub use timeline::*;

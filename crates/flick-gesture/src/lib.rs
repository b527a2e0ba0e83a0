//! Swipe gesture classification and drag tracking for Flick
//!
//! The classifier is a set of pure functions over touch snapshots; the
//! tracker is the small state machine that feeds it from raw pointer
//! events. Neither knows anything about cards or decks.

pub mod classifier;
mod config;
mod tracker;
mod types;

pub use config::*;
pub use tracker::*;
pub use types::*;

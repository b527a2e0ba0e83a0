//! Card stack controller for Flick
//!
//! A [`SwipeDeck`] owns a finite stack of cards, one drag tracker, and at
//! most one exit animation at a time. Pointer events go in; exactly-once
//! swipe callbacks and an edge-triggered stack-empty notification come out.

mod card;
mod deck;
mod exit;
mod observers;

pub use card::*;
pub use deck::*;
pub use exit::*;
pub use observers::*;

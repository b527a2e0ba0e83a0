//! Pure math/data for geometry in Flick
//!
//! Geometry primitives shared by the gesture classifier and the photo
//! pager: points and rectangles in logical pixels.

mod geometry;

pub use geometry::*;

use flick_geometry::{Point, Rect};

/// Carousel index over a card's photos.
///
/// A tap on the right half of the photo pages forward, the left half pages
/// back. Discovery cards stop at the ends; the own-profile view wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoPager {
    index: usize,
    count: usize,
    wraps: bool,
}

impl PhotoPager {
    /// Pager that stops at the first and last photo.
    pub fn clamped(count: usize) -> Self {
        Self {
            index: 0,
            count,
            wraps: false,
        }
    }

    /// Pager that cycles past either end.
    pub fn wrapping(count: usize) -> Self {
        Self {
            index: 0,
            count,
            wraps: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn next(&mut self) {
        if self.count == 0 {
            return;
        }
        if self.index + 1 < self.count {
            self.index += 1;
        } else if self.wraps {
            self.index = 0;
        }
    }

    pub fn prev(&mut self) {
        if self.count == 0 {
            return;
        }
        if self.index > 0 {
            self.index -= 1;
        } else if self.wraps {
            self.index = self.count - 1;
        }
    }

    /// Routes a tap inside the photo's bounds. Strictly right of the
    /// midline advances; the midline itself counts as the left half. Taps
    /// outside the bounds are ignored.
    pub fn tap(&mut self, point: Point, bounds: Rect) {
        if !bounds.contains(point) {
            return;
        }
        if point.x > bounds.mid_x() {
            self.next();
        } else {
            self.prev();
        }
    }

    /// Points the pager at a new photo set, back at the first photo.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.index = 0;
    }
}

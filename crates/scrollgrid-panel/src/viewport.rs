#![forbid(unsafe_code)]

//! Vertical scroll window over the grid content.

use scrollgrid_core::Rect;

/// The visible slice of the grid, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }

    /// Scroll the minimum amount that brings `cell` into view.
    ///
    /// The bottom edge is corrected first and the top edge second, so a cell
    /// taller than the viewport ends up top-aligned.
    pub fn scroll_into_view(&mut self, cell: Rect) {
        if cell.bottom() > self.bottom() {
            self.scroll_top = cell.bottom() - self.height;
        }
        if cell.top() < self.scroll_top {
            self.scroll_top = cell.top();
        }
    }

    /// Apply a wheel delta, clamped to the scrollable range.
    pub fn scroll_by(&mut self, delta_y: f32, content_height: f32) {
        let max = (content_height - self.height).max(0.0);
        self.scroll_top = (self.scroll_top + delta_y).clamp(0.0, max);
    }

    /// Change the height and re-clamp the scroll offset.
    pub fn resize(&mut self, height: f32, content_height: f32) {
        self.height = height.max(0.0);
        self.scroll_by(0.0, content_height);
    }
}

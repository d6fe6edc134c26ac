#![forbid(unsafe_code)]

//! Prefetch backpressure.
//!
//! At most one fetch is outstanding. The lock is set when a request goes out
//! and cleared by the next batch, whatever that batch contains; there is no
//! timer, retry, or queue.

use scrollgrid_core::GridGeometry;
use scrollgrid_layout::GridLayout;

use crate::host::ScrollRequest;
use crate::viewport::Viewport;

/// Decides when to ask the host for more candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchController {
    fetching: bool,
    scroll_end: bool,
}

impl PrefetchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch is outstanding.
    #[inline]
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// The host reported that no candidates exist beyond the current ones.
    #[inline]
    #[must_use]
    pub fn scroll_end(&self) -> bool {
        self.scroll_end
    }

    /// A batch arrived: release the lock and take the new end flag.
    pub fn complete(&mut self, scroll_end: bool) {
        if self.fetching {
            tracing::trace!("prefetch lock released");
        }
        self.fetching = false;
        self.scroll_end = scroll_end;
    }

    /// Check after a highlight move to `active`; counts rows strictly below its row.
    pub fn after_move(
        &mut self,
        layout: &GridLayout,
        active: usize,
        geometry: &GridGeometry,
    ) -> Option<ScrollRequest> {
        let rows = layout.row_map.row_count();
        let row = layout.row_map.row_of(active);
        let remaining = rows.saturating_sub(row + 1);
        self.request(remaining, layout.cell_count(), geometry)
    }

    /// Check after a wheel scroll; counts rows starting at or below the viewport bottom.
    pub fn on_wheel(
        &mut self,
        layout: &GridLayout,
        viewport: &Viewport,
        geometry: &GridGeometry,
    ) -> Option<ScrollRequest> {
        let bottom = viewport.bottom();
        let remaining = (0..layout.row_map.row_count())
            .filter_map(|row| layout.row_rect(row))
            .filter(|rect| rect.top() >= bottom)
            .count();
        self.request(remaining, layout.cell_count(), geometry)
    }

    fn request(
        &mut self,
        rows_remaining: usize,
        total: usize,
        geometry: &GridGeometry,
    ) -> Option<ScrollRequest> {
        if self.scroll_end {
            return None;
        }
        if self.fetching {
            tracing::debug!(rows_remaining, "prefetch suppressed, fetch outstanding");
            return None;
        }
        if rows_remaining > geometry.max_rows {
            return None;
        }
        self.fetching = true;
        let length = geometry.page_len();
        tracing::debug!(start = total, length, rows_remaining, "prefetch requested");
        Some(ScrollRequest::Fetch {
            start: total,
            length,
        })
    }
}

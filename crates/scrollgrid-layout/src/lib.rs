#![forbid(unsafe_code)]

//! Row partitioning for the scrolling candidate grid.
//!
//! This crate turns an ordered list of candidate cells into wrapped rows:
//!
//! - [`RowMap`] - per-row cell counts, the row structure every other
//!   component navigates by
//! - [`GridLayout`] - a row map plus the box and trailing separator of every cell
//! - [`flow`] - computes a layout from natural cell sizes against the column budget
//! - [`measured`] - infers a layout from boxes a renderer already placed
//!
//! A layout is rebuilt from scratch whenever the cells or the geometry change;
//! nothing here is patched incrementally.
//!
//! # Invariants
//!
//! 1. `row_map.cell_count() == cells.len() == separators.len()`
//! 2. No row in a row map is empty.
//! 3. Cells are in grid order: row-major, left to right.

pub mod flow;
pub mod measured;

use std::ops::Range;

pub use flow::FlowGrid;
pub use measured::{partition_measured, row_map_from_tops};
pub use scrollgrid_core::geometry::{Rect, Size};
use scrollgrid_core::GridGeometry;

/// Cell counts per visual row, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowMap {
    rows: Vec<usize>,
}

impl RowMap {
    /// Build a row map from per-row counts. Zero-length rows are dropped.
    #[must_use]
    pub fn new(rows: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rows: rows.into_iter().filter(|&n| n > 0).collect(),
        }
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total cells across all rows.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().sum()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells in `row`, or 0 if the row does not exist.
    #[inline]
    #[must_use]
    pub fn len_of(&self, row: usize) -> usize {
        self.rows.get(row).copied().unwrap_or(0)
    }

    /// Cells in the first `n` rows; also the index of row `n`'s first cell.
    #[must_use]
    pub fn cells_before(&self, n: usize) -> usize {
        self.rows.iter().take(n).sum()
    }

    /// Index range of the cells in `row`.
    #[must_use]
    pub fn range_of(&self, row: usize) -> Range<usize> {
        let start = self.cells_before(row);
        start..start + self.len_of(row)
    }

    /// Row containing cell `index`.
    ///
    /// Indices past the end resolve to the last row. Callers must not ask an
    /// empty map; it answers 0.
    #[must_use]
    pub fn row_of(&self, index: usize) -> usize {
        let mut end = 0;
        for (row, &count) in self.rows.iter().enumerate() {
            end += count;
            if index < end {
                return row;
            }
        }
        self.rows.len().saturating_sub(1)
    }

    /// Position of cell `index` within its row (0-based).
    #[must_use]
    pub fn column_of(&self, index: usize) -> usize {
        index - self.cells_before(self.row_of(index))
    }

    /// Per-row counts.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.rows
    }
}

/// How a cell's trailing separator is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorKind {
    /// Sits between two cells of one row at its natural width.
    #[default]
    Natural,
    /// Forced to zero width so it does not count towards the next row.
    Collapsed,
    /// Grows to fill the rest of its row.
    Fill,
    /// Held at the gap width of the row above so a short last row stays left-aligned.
    Pinned,
}

/// The separator trailing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Separator {
    pub kind: SeparatorKind,
    /// Width in pixels.
    pub width: f32,
}

impl Separator {
    #[must_use]
    pub const fn natural(width: f32) -> Self {
        Self {
            kind: SeparatorKind::Natural,
            width,
        }
    }

    #[must_use]
    pub const fn collapsed() -> Self {
        Self {
            kind: SeparatorKind::Collapsed,
            width: 0.0,
        }
    }

    #[must_use]
    pub const fn fill(width: f32) -> Self {
        Self {
            kind: SeparatorKind::Fill,
            width,
        }
    }

    #[must_use]
    pub const fn pinned(width: f32) -> Self {
        Self {
            kind: SeparatorKind::Pinned,
            width,
        }
    }
}

/// A fully partitioned grid: rows, cell boxes, and separators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    pub row_map: RowMap,
    /// Box of every cell in content coordinates.
    pub cells: Vec<Rect>,
    /// Trailing separator of every cell.
    pub separators: Vec<Separator>,
    /// Layout units each cell occupies.
    pub units: Vec<usize>,
}

impl GridLayout {
    /// Layout with no cells.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Box of cell `index`.
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Rect> {
        self.cells.get(index).copied()
    }

    /// Bounding box of the cells in `row`.
    #[must_use]
    pub fn row_rect(&self, row: usize) -> Option<Rect> {
        let range = self.row_map.range_of(row);
        self.cells[range.clone()]
            .iter()
            .copied()
            .reduce(|a, b| a.union(&b))
    }

    /// Height of `row`, or 0 if it does not exist.
    #[must_use]
    pub fn row_height(&self, row: usize) -> f32 {
        self.row_rect(row).map_or(0.0, |r| r.height)
    }

    /// Height of all content.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.cells.iter().map(Rect::bottom).fold(0.0, f32::max)
    }

    /// Layout units used by `row`.
    #[must_use]
    pub fn units_in_row(&self, row: usize) -> usize {
        self.units[self.row_map.range_of(row)].iter().sum()
    }

    /// Natural gap of `row`: the width of its first intra-row separator.
    ///
    /// Rows with a single cell have no intra-row separator and report 0.
    #[must_use]
    pub fn gap_of_row(&self, row: usize) -> f32 {
        let range = self.row_map.range_of(row);
        if range.len() < 2 {
            return 0.0;
        }
        self.separators[range.start].width
    }

    /// Terminal-batch post-condition: a short last row keeps the gaps of the
    /// row above instead of stretching to the viewport edge.
    pub(crate) fn pin_short_last_row(&mut self, geometry: &GridGeometry) {
        let rows = self.row_map.row_count();
        if rows == 0 {
            return;
        }
        let last = rows - 1;
        if self.units_in_row(last) >= geometry.max_columns {
            return;
        }
        let gap = if last > 0 { self.gap_of_row(last - 1) } else { 0.0 };
        for i in self.row_map.range_of(last) {
            self.separators[i] = Separator::pinned(gap);
        }
    }
}

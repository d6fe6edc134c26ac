#![forbid(unsafe_code)]

//! Variable-width flow grid.
//!
//! Each cell's natural width is converted into whole layout units
//! (`ceil(width / unit_width)`, capped at `max_columns`) and snapped to
//! `units * unit_width` so cells in a column share a consistent width. Units
//! accumulate left to right; a cell that would push the running total past
//! `max_columns` closes the row and opens the next one.
//!
//! # Separators
//!
//! - A row closed on overflow grows its trailing separator over the unused units.
//! - The open last row does the same while more data may arrive, so it shrinks
//!   back once a continuation fills it.
//! - For a terminal batch the short last row is pinned instead (see
//!   [`GridLayout`]).

use scrollgrid_core::GridGeometry;
use scrollgrid_core::geometry::{Rect, Size};

use crate::{GridLayout, RowMap, Separator};

/// Flow-grid partitioner for a given geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowGrid {
    geometry: GridGeometry,
}

impl FlowGrid {
    /// Create a partitioner.
    #[must_use]
    pub const fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// The geometry this partitioner lays out against.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Lay out cells of the given natural sizes.
    ///
    /// Rows are at least `row_height` tall and grow to their tallest cell.
    /// `scroll_end` marks the batch as terminal.
    #[must_use]
    pub fn layout(&self, sizes: &[Size], scroll_end: bool) -> GridLayout {
        if sizes.is_empty() {
            return GridLayout::empty();
        }
        let g = &self.geometry;
        let unit = g.cell_unit_width;

        let units: Vec<usize> = sizes.iter().map(|s| g.units_for(s.width)).collect();
        let mut rows = Vec::new();
        let mut separators = vec![Separator::natural(0.0); sizes.len()];

        let mut used = 0;
        let mut count = 0;
        for (i, &u) in units.iter().enumerate() {
            if count > 0 && used + u > g.max_columns {
                if used < g.max_columns {
                    separators[i - 1] = Separator::fill((g.max_columns - used) as f32 * unit);
                }
                rows.push(count);
                used = 0;
                count = 0;
            }
            used += u;
            count += 1;
        }
        rows.push(count);
        if used < g.max_columns {
            separators[sizes.len() - 1] = Separator::fill((g.max_columns - used) as f32 * unit);
        }

        let row_map = RowMap::new(rows);
        let mut cells = Vec::with_capacity(sizes.len());
        let mut top = 0.0;
        for row in 0..row_map.row_count() {
            let range = row_map.range_of(row);
            let height = sizes[range.clone()]
                .iter()
                .map(|s| s.height)
                .fold(g.row_height, f32::max);
            let mut x = 0.0;
            for i in range {
                let width = units[i] as f32 * unit;
                cells.push(Rect::new(x, top, width, height));
                x += width + separators[i].width;
            }
            top += height;
        }

        let mut layout = GridLayout {
            row_map,
            cells,
            separators,
            units,
        };
        if scroll_end {
            layout.pin_short_last_row(g);
        }
        layout
    }
}

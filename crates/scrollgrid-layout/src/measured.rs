#![forbid(unsafe_code)]

//! Fixed-row grid inferred from rendered boxes.
//!
//! When a renderer has already placed the cells, row membership is read back
//! from their vertical positions: cells sharing the running row top belong to
//! the open row, and a change in top opens a new row. The flow partitioner
//! produces boxes this module must agree with, which makes it the
//! verification oracle for computed layouts.

use scrollgrid_core::GridGeometry;
use scrollgrid_core::geometry::Rect;

use crate::{GridLayout, RowMap, Separator};

/// Tops closer than this are the same row.
const TOP_EPSILON: f32 = 0.01;

#[inline]
fn same_top(a: f32, b: f32) -> bool {
    (a - b).abs() < TOP_EPSILON
}

/// Row map of cells in grid order, grouped by top coordinate.
#[must_use]
pub fn row_map_from_tops(cells: &[Rect]) -> RowMap {
    let Some(first) = cells.first() else {
        return RowMap::default();
    };
    let mut rows = Vec::new();
    let mut current_top = first.y;
    let mut count = 0;
    for cell in cells {
        if same_top(cell.y, current_top) {
            count += 1;
        } else {
            rows.push(count);
            count = 1;
            current_top = cell.y;
        }
    }
    rows.push(count);
    RowMap::new(rows)
}

/// Partition measured cell and separator boxes into a [`GridLayout`].
///
/// `separators[i]` is the separator rendered after `cells[i]`; missing
/// entries are treated as zero-width. When the separator closing a row reports
/// the next row's top (an overlong cell pushed it down), it is collapsed so it
/// does not count as part of the new row.
#[must_use]
pub fn partition_measured(
    cells: &[Rect],
    separators: &[Rect],
    geometry: &GridGeometry,
    scroll_end: bool,
) -> GridLayout {
    let row_map = row_map_from_tops(cells);
    let mut seps: Vec<Separator> = (0..cells.len())
        .map(|i| Separator::natural(separators.get(i).map_or(0.0, |r| r.width)))
        .collect();

    for row in 1..row_map.row_count() {
        let first = row_map.cells_before(row);
        let row_top = cells[first].y;
        if let Some(sep) = separators.get(first - 1)
            && same_top(sep.y, row_top)
        {
            seps[first - 1] = Separator::collapsed();
        }
    }

    let mut layout = GridLayout {
        row_map,
        cells: cells.to_vec(),
        separators: seps,
        units: cells.iter().map(|c| geometry.units_for(c.width)).collect(),
    };
    if scroll_end {
        layout.pin_short_last_row(geometry);
    }
    layout
}

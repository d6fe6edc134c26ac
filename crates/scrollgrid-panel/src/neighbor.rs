#![forbid(unsafe_code)]

//! Directional neighbor search over a partitioned grid.
//!
//! Left/Right walk the flat index order, Home/End clamp to the active row,
//! and Up/Down follow the column under the current cell even when rows are
//! ragged. A `None` result is an ordinary outcome ("no cell that way"), which
//! callers turn into either no movement or a collapse.
//!
//! # Column following
//!
//! Moving vertically scans the target row left to right, skips cells that end
//! at or before the current cell's left edge, and stops at the first cell `c`
//! that reaches past it. `c` is taken if its right edge passes the current
//! midpoint, or if its overlap past the current left edge is larger than the
//! gap between its own left edge and the current left edge; otherwise the cell
//! after `c` is taken. When the scan runs out the row's last cell is taken.

use scrollgrid_core::Direction;
use scrollgrid_layout::GridLayout;

/// Destination of moving from `index` in `direction`, or `None` if there is none.
///
/// Page moves take up to `max_rows` single-row steps and commit the last cell
/// reached; they fail only when the very first step fails.
#[must_use]
pub fn resolve(
    layout: &GridLayout,
    index: usize,
    direction: Direction,
    max_rows: usize,
) -> Option<usize> {
    let count = layout.cell_count();
    if index >= count {
        return None;
    }
    let rows = &layout.row_map;
    let row = rows.row_of(index);

    let result = match direction {
        Direction::Left => index.checked_sub(1),
        Direction::Right => (index + 1 < count).then_some(index + 1),
        Direction::Home => Some(rows.range_of(row).start),
        Direction::End => Some(rows.range_of(row).end - 1),
        Direction::Up => row
            .checked_sub(1)
            .and_then(|target| in_row_below_or_above(layout, index, target)),
        Direction::Down => in_row_below_or_above(layout, index, row + 1),
        Direction::PageUp => page(layout, index, Direction::Up, max_rows),
        Direction::PageDown => page(layout, index, Direction::Down, max_rows),
    };
    tracing::trace!(index, ?direction, ?result, "resolve neighbor");
    result
}

fn in_row_below_or_above(layout: &GridLayout, index: usize, target: usize) -> Option<usize> {
    if target >= layout.row_map.row_count() {
        return None;
    }
    let current = layout.cell(index)?;
    let left = current.left();
    let mid = current.mid_x();

    let range = layout.row_map.range_of(target);
    let last = range.end - 1;
    for i in range.start..last {
        let rect = layout.cells[i];
        if rect.right() <= left {
            continue;
        }
        let keep = rect.right() > mid || rect.right() - left > left - rect.left();
        return Some(if keep { i } else { i + 1 });
    }
    Some(last)
}

fn page(layout: &GridLayout, index: usize, step: Direction, max_rows: usize) -> Option<usize> {
    let mut current = index;
    let mut moved = false;
    for _ in 0..max_rows {
        match resolve(layout, current, step, max_rows) {
            Some(next) => {
                current = next;
                moved = true;
            }
            None => break,
        }
    }
    moved.then_some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollgrid_core::{GridGeometry, Rect, Size};
    use scrollgrid_layout::{FlowGrid, RowMap, Separator};

    fn uniform(count: usize, columns: usize) -> GridLayout {
        let geometry = GridGeometry {
            max_columns: columns,
            ..GridGeometry::default()
        };
        FlowGrid::new(geometry).layout(&vec![Size::new(10.0, 30.0); count], false)
    }

    fn ragged(rows: &[&[(f32, f32)]]) -> GridLayout {
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for &(x, w) in row.iter() {
                cells.push(Rect::new(x, r as f32 * 30.0, w, 30.0));
            }
        }
        let n = cells.len();
        GridLayout {
            row_map: RowMap::new(rows.iter().map(|r| r.len())),
            cells,
            separators: vec![Separator::default(); n],
            units: vec![1; n],
        }
    }

    #[test]
    fn down_into_short_row() {
        // [A, B]
        // [C]
        let layout = uniform(3, 2);
        assert_eq!(layout.row_map.as_slice(), &[2, 1]);
        assert_eq!(resolve(&layout, 0, Direction::Down, 6), Some(2));
        assert_eq!(resolve(&layout, 1, Direction::Down, 6), Some(2));
    }

    #[test]
    fn vertical_follows_column() {
        let layout = uniform(12, 4);
        assert_eq!(resolve(&layout, 1, Direction::Down, 6), Some(5));
        assert_eq!(resolve(&layout, 5, Direction::Down, 6), Some(9));
        assert_eq!(resolve(&layout, 9, Direction::Up, 6), Some(5));
    }

    #[test]
    fn vertical_edges_return_none() {
        let layout = uniform(8, 4);
        assert_eq!(resolve(&layout, 2, Direction::Up, 6), None);
        assert_eq!(resolve(&layout, 6, Direction::Down, 6), None);
    }

    #[test]
    fn horizontal_bounds() {
        let layout = uniform(5, 4);
        assert_eq!(resolve(&layout, 0, Direction::Left, 6), None);
        assert_eq!(resolve(&layout, 4, Direction::Right, 6), None);
        // Left/Right cross row boundaries in flat order.
        assert_eq!(resolve(&layout, 3, Direction::Right, 6), Some(4));
        assert_eq!(resolve(&layout, 4, Direction::Left, 6), Some(3));
    }

    #[test]
    fn home_end_stay_in_row() {
        let layout = uniform(10, 4);
        assert_eq!(resolve(&layout, 6, Direction::Home, 6), Some(4));
        assert_eq!(resolve(&layout, 6, Direction::End, 6), Some(7));
        assert_eq!(resolve(&layout, 9, Direction::End, 6), Some(9));
    }

    #[test]
    fn out_of_range_index() {
        let layout = uniform(3, 4);
        assert_eq!(resolve(&layout, 3, Direction::Left, 6), None);
        assert_eq!(resolve(&GridLayout::empty(), 0, Direction::Home, 6), None);
    }

    #[test]
    fn ragged_prefers_cell_past_midpoint() {
        // Row 0: [0..100)
        // Row 1: [0..40) [40..200)
        let layout = ragged(&[&[(0.0, 100.0)], &[(0.0, 40.0), (40.0, 160.0)]]);
        // First cell ends at 40, short of the midpoint 50; overlap 40 > gap 0.
        assert_eq!(resolve(&layout, 0, Direction::Down, 6), Some(1));
    }

    #[test]
    fn ragged_skips_cells_left_of_current() {
        // Row 0: [0..50) [50..100) [100..150)
        // Row 1: [0..60) [60..110) [110..150)
        let layout = ragged(&[
            &[(0.0, 50.0), (50.0, 50.0), (100.0, 50.0)],
            &[(0.0, 60.0), (60.0, 50.0), (110.0, 40.0)],
        ]);
        // From [100..150): mid 125. [0..60) skipped, [60..110) reaches past 100
        // but ends before 125; overlap 10 < gap 40, so the next cell wins.
        assert_eq!(resolve(&layout, 2, Direction::Down, 6), Some(5));
        // From [50..100): mid 75. [0..60) ends at 60, overlap 10 < gap 50 -> next.
        assert_eq!(resolve(&layout, 1, Direction::Down, 6), Some(4));
    }

    #[test]
    fn ragged_falls_back_to_last_cell() {
        // Row 0: [0..30) [30..300)
        // Row 1: [0..30) [30..60)
        let layout = ragged(&[&[(0.0, 30.0), (30.0, 270.0)], &[(0.0, 30.0), (30.0, 30.0)]]);
        assert_eq!(resolve(&layout, 1, Direction::Down, 6), Some(3));
    }

    #[test]
    fn page_moves_up_to_max_rows() {
        // 10 rows of 2
        let layout = uniform(20, 2);
        assert_eq!(resolve(&layout, 0, Direction::PageDown, 6), Some(12));
        assert_eq!(resolve(&layout, 13, Direction::PageUp, 6), Some(1));
    }

    #[test]
    fn page_stops_early_and_commits() {
        let layout = uniform(8, 2);
        assert_eq!(resolve(&layout, 1, Direction::PageDown, 6), Some(7));
        assert_eq!(resolve(&layout, 4, Direction::PageUp, 6), Some(0));
    }

    #[test]
    fn page_fails_only_if_first_step_fails() {
        let layout = uniform(8, 2);
        assert_eq!(resolve(&layout, 1, Direction::PageUp, 6), None);
        assert_eq!(resolve(&layout, 6, Direction::PageDown, 6), None);
    }
}

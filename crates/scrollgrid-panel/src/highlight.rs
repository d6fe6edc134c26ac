#![forbid(unsafe_code)]

//! Highlight tracking and per-cell visual markers.
//!
//! The tracker owns the logical highlighted index, the rank label of every
//! cell, and the [`CellMarks`] a renderer paints. Exactly one cell carries
//! [`CellMarks::HIGHLIGHTED`] whenever the grid is non-empty; hover may move
//! that marker away from the logical index, but never duplicate it.

use bitflags::bitflags;
use scrollgrid_layout::GridLayout;
use std::ops::Range;

use crate::label::LabelFormatter;

bitflags! {
    /// Visual state of one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellMarks: u8 {
        /// The highlight marker. Exactly one cell carries it.
        const HIGHLIGHTED          = 0b0000_0001;
        /// Member of the active row; shows its rank label.
        const HIGHLIGHTED_ROW      = 0b0000_0010;
        /// Host-side highlight of a non-scrolling batch.
        const HIGHLIGHTED_ORIGINAL = 0b0000_0100;
        /// Pointer is over the cell (additive hover).
        const HOVERED              = 0b0000_1000;
        /// First cell of a non-scrolling batch.
        const FIRST                = 0b0001_0000;
        /// Last cell of a non-scrolling batch.
        const LAST                 = 0b0010_0000;
    }
}

/// Highlighted index, rank labels, and cell markers.
#[derive(Debug, Clone, Default)]
pub struct HighlightTracker {
    highlighted: Option<usize>,
    /// Cell currently carrying `HIGHLIGHTED`; differs from `highlighted`
    /// only while hover has moved the marker.
    marker: Option<usize>,
    hovered: Option<usize>,
    marks: Vec<CellMarks>,
    labels: Vec<String>,
    formatter: LabelFormatter,
}

impl HighlightTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state and start over with `len` unmarked cells.
    pub fn reset(&mut self, len: usize) {
        self.highlighted = None;
        self.marker = None;
        self.hovered = None;
        self.marks = vec![CellMarks::empty(); len];
        self.labels = vec![self.formatter.neutral(); len];
    }

    /// Append unmarked cells so the tracker covers `len` cells.
    pub fn extend_to(&mut self, len: usize) {
        if len > self.marks.len() {
            let neutral = self.formatter.neutral();
            self.marks.resize(len, CellMarks::empty());
            self.labels.resize(len, neutral);
        }
    }

    /// Replace the rank label template. Existing labels are not rewritten.
    pub fn set_formatter(&mut self, formatter: LabelFormatter) {
        self.formatter = formatter;
    }

    #[must_use]
    pub fn formatter(&self) -> &LabelFormatter {
        &self.formatter
    }

    /// Logical highlighted index.
    #[inline]
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Cell currently carrying the highlight marker.
    #[inline]
    #[must_use]
    pub fn marker(&self) -> Option<usize> {
        self.marker
    }

    #[inline]
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn marks(&self, index: usize) -> CellMarks {
        self.marks.get(index).copied().unwrap_or_default()
    }

    /// Rank label shown on cell `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of cells carrying the highlight marker.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| m.contains(CellMarks::HIGHLIGHTED))
            .count()
    }

    /// Index range of the active row.
    #[must_use]
    pub fn active_row(&self, layout: &GridLayout) -> Option<Range<usize>> {
        let index = self.highlighted?;
        (index < layout.cell_count()).then(|| layout.row_map.range_of(layout.row_map.row_of(index)))
    }

    /// Move the highlight to `new`, re-ranking the active row.
    ///
    /// With `clear_old` the previous active row loses its ranks first. The
    /// marker is always taken off whichever cell held it, so the single-marker
    /// property holds regardless.
    pub fn set_highlight(&mut self, layout: &GridLayout, new: usize, clear_old: bool) {
        if new >= layout.cell_count() {
            return;
        }
        self.extend_to(layout.cell_count());
        if clear_old && let Some(range) = self.active_row(layout) {
            let neutral = self.formatter.neutral();
            for i in range {
                self.marks[i].remove(CellMarks::HIGHLIGHTED_ROW);
                self.labels[i].clone_from(&neutral);
            }
        }
        if let Some(old) = self.marker
            && let Some(m) = self.marks.get_mut(old)
        {
            m.remove(CellMarks::HIGHLIGHTED);
        }

        self.highlighted = Some(new);
        self.marker = Some(new);
        let range = layout.row_map.range_of(layout.row_map.row_of(new));
        for (pos, i) in range.enumerate() {
            self.marks[i].insert(CellMarks::HIGHLIGHTED_ROW);
            self.labels[i] = self.formatter.format((pos + 1) % 10);
        }
        self.marks[new].insert(CellMarks::HIGHLIGHTED);
    }

    /// Cell selected by quick-select `digit` in the active row.
    ///
    /// Digit 1 is the first cell and digit 0 the tenth.
    #[must_use]
    pub fn index_for_digit(&self, layout: &GridLayout, digit: u8) -> Option<usize> {
        let range = self.active_row(layout)?;
        let offset = (usize::from(digit) + 9) % 10;
        (offset < range.len()).then_some(range.start + offset)
    }

    /// Move the highlight marker to `index` without changing the logical highlight.
    pub fn move_marker(&mut self, index: usize) {
        if index >= self.marks.len() {
            return;
        }
        if let Some(old) = self.marker {
            self.marks[old].remove(CellMarks::HIGHLIGHTED);
        }
        self.marks[index].insert(CellMarks::HIGHLIGHTED);
        self.marker = Some(index);
    }

    /// Set or clear the additive hover marker.
    pub fn set_hover(&mut self, index: Option<usize>) {
        if let Some(old) = self.hovered.take()
            && let Some(m) = self.marks.get_mut(old)
        {
            m.remove(CellMarks::HOVERED);
        }
        if let Some(new) = index
            && let Some(m) = self.marks.get_mut(new)
        {
            m.insert(CellMarks::HOVERED);
            self.hovered = Some(new);
        }
    }

    /// Put the marker back on the logical highlight and drop any hover.
    pub fn restore_marker(&mut self) {
        self.set_hover(None);
        if let Some(index) = self.highlighted {
            self.move_marker(index);
        }
    }

    /// Strip every rank label and active-row marker; row structure is about to change.
    pub fn clear_ranks(&mut self) {
        let neutral = self.formatter.neutral();
        for (mark, label) in self.marks.iter_mut().zip(&mut self.labels) {
            mark.remove(CellMarks::HIGHLIGHTED_ROW);
            label.clone_from(&neutral);
        }
    }

    /// Highlight `index` without ranking a row, as a flat list does.
    pub fn highlight_flat(&mut self, index: usize) {
        if index >= self.marks.len() {
            return;
        }
        self.move_marker(index);
        self.highlighted = Some(index);
    }

    /// Markers of a non-scrolling batch: host highlight and first/last cells.
    pub fn mark_flat(&mut self, original: Option<usize>) {
        let len = self.marks.len();
        if len == 0 {
            return;
        }
        self.marks[0].insert(CellMarks::FIRST);
        self.marks[len - 1].insert(CellMarks::LAST);
        if let Some(i) = original
            && let Some(m) = self.marks.get_mut(i)
        {
            m.insert(CellMarks::HIGHLIGHTED_ORIGINAL);
        }
    }
}

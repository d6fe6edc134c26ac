#![forbid(unsafe_code)]

//! Natural cell sizes.
//!
//! The flow layout needs the size each candidate cell would take before it is
//! snapped to layout units. Hosts with a real text shaper implement
//! [`CellMetrics`] themselves; [`TextMetrics`] is a monospace approximation
//! driven by Unicode display width.

use scrollgrid_core::geometry::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::candidate::Candidate;

/// Measures the natural size of a candidate cell.
pub trait CellMetrics {
    /// Natural size of `candidate`, wrapping content that exceeds `max_width`.
    fn measure(&self, candidate: &Candidate, max_width: f32) -> Size;
}

impl<F> CellMetrics for F
where
    F: Fn(&Candidate, f32) -> Size,
{
    fn measure(&self, candidate: &Candidate, max_width: f32) -> Size {
        self(candidate, max_width)
    }
}

/// Display-width based metrics.
///
/// A cell renders as `label text comment` separated by single spaces, with
/// `padding` added on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Pixels per display column.
    pub column_width: f32,
    pub line_height: f32,
    /// Horizontal padding on each side.
    pub padding_x: f32,
    /// Vertical padding on each side.
    pub padding_y: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            column_width: 8.0,
            line_height: 20.0,
            padding_x: 5.0,
            padding_y: 5.0,
        }
    }
}

impl TextMetrics {
    fn content(candidate: &Candidate) -> String {
        [
            candidate.label.as_str(),
            candidate.text.as_str(),
            candidate.comment.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Greedy grapheme wrap; returns (widest line in columns, line count).
    fn wrap(content: &str, max_columns: usize) -> (usize, usize) {
        let mut lines = 1;
        let mut line = 0;
        let mut widest = 0;
        for grapheme in content.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme);
            if line > 0 && line + w > max_columns {
                widest = widest.max(line);
                lines += 1;
                line = 0;
            }
            line += w;
        }
        (widest.max(line), lines)
    }
}

impl CellMetrics for TextMetrics {
    fn measure(&self, candidate: &Candidate, max_width: f32) -> Size {
        let content = Self::content(candidate);
        let inner = (max_width - 2.0 * self.padding_x).max(self.column_width);
        let max_columns = (inner / self.column_width).floor().max(1.0) as usize;
        let (columns, lines) = Self::wrap(&content, max_columns);
        Size::new(
            columns as f32 * self.column_width + 2.0 * self.padding_x,
            lines as f32 * self.line_height + 2.0 * self.padding_y,
        )
    }
}

#![forbid(unsafe_code)]

//! Canonical input types for the candidate grid.
//!
//! The host delivers keyboard intents as small integer codes and the scroll
//! macro-state as a 0/1/2 tag. Both are decoded here into enums so the rest of
//! the engine never sees raw numbers.
//!
//! # Wire codes
//!
//! | Code      | Action                 |
//! |-----------|------------------------|
//! | `0..=9`   | Digit quick-select     |
//! | `10..=17` | Up, Down, Left, Right, Home, End, PageUp, PageDown |
//! | `19`      | Collapse               |
//! | `20`      | Commit                 |

use std::fmt;

use crate::config::GridGeometry;

/// A directional highlight move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Direction {
    /// Whether a failed move in this direction from the top row collapses the grid.
    #[must_use]
    pub const fn collapses_at_top(self) -> bool {
        matches!(self, Self::Up | Self::PageUp)
    }
}

/// A keyboard command routed to the grid while it is scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollKeyAction {
    /// Quick-select by the digit shown on a cell of the active row (`0..=9`).
    Select(u8),
    /// Move the highlight.
    Move(Direction),
    /// Shrink the grid back to the single-row view.
    Collapse,
    /// Select the highlighted cell.
    Commit,
}

impl ScrollKeyAction {
    /// Encode back to the host's integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Select(digit) => digit as i32,
            Self::Move(Direction::Up) => 10,
            Self::Move(Direction::Down) => 11,
            Self::Move(Direction::Left) => 12,
            Self::Move(Direction::Right) => 13,
            Self::Move(Direction::Home) => 14,
            Self::Move(Direction::End) => 15,
            Self::Move(Direction::PageUp) => 16,
            Self::Move(Direction::PageDown) => 17,
            Self::Collapse => 19,
            Self::Commit => 20,
        }
    }
}

impl TryFrom<i32> for ScrollKeyAction {
    type Error = ActionCodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        let action = match code {
            0..=9 => Self::Select(code as u8),
            10 => Self::Move(Direction::Up),
            11 => Self::Move(Direction::Down),
            12 => Self::Move(Direction::Left),
            13 => Self::Move(Direction::Right),
            14 => Self::Move(Direction::Home),
            15 => Self::Move(Direction::End),
            16 => Self::Move(Direction::PageUp),
            17 => Self::Move(Direction::PageDown),
            19 => Self::Collapse,
            20 => Self::Commit,
            _ => return Err(ActionCodeError::UnknownAction(code)),
        };
        Ok(action)
    }
}

/// Macro-state tag carried by every candidate batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollState {
    /// Ordinary flat list; no grid.
    #[default]
    Closed,
    /// One row shown with an expand affordance.
    Ready,
    /// The full wrapped grid is active.
    Scrolling,
}

impl TryFrom<u8> for ScrollState {
    type Error = ActionCodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Closed),
            1 => Ok(Self::Ready),
            2 => Ok(Self::Scrolling),
            _ => Err(ActionCodeError::UnknownScrollState(tag)),
        }
    }
}

/// Decoding failure for a host-supplied code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCodeError {
    /// No scroll key action has this code.
    UnknownAction(i32),
    /// No scroll state has this tag.
    UnknownScrollState(u8),
}

impl fmt::Display for ActionCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction(code) => write!(f, "unknown scroll key action code {code}"),
            Self::UnknownScrollState(tag) => write!(f, "unknown scroll state tag {tag}"),
        }
    }
}

impl std::error::Error for ActionCodeError {}

/// Canonical input event delivered to the grid controller.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A keyboard command.
    Key(ScrollKeyAction),

    /// Wheel or trackpad scroll over the grid viewport.
    Wheel {
        /// Vertical delta in pixels; positive scrolls content up (towards later rows).
        delta_y: f32,
    },

    /// Primary-button click released over a candidate cell.
    Click(usize),

    /// Pointer moved over a candidate cell.
    Hover(usize),

    /// Pointer left the grid.
    PointerLeave,

    /// The expand affordance was activated.
    Expand,

    /// Style changed; new grid geometry applies.
    Resize(GridGeometry),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_codes_decode() {
        for d in 0..=9 {
            assert_eq!(
                ScrollKeyAction::try_from(d),
                Ok(ScrollKeyAction::Select(d as u8))
            );
        }
    }

    #[test]
    fn move_codes_decode() {
        assert_eq!(
            ScrollKeyAction::try_from(10),
            Ok(ScrollKeyAction::Move(Direction::Up))
        );
        assert_eq!(
            ScrollKeyAction::try_from(17),
            Ok(ScrollKeyAction::Move(Direction::PageDown))
        );
        assert_eq!(ScrollKeyAction::try_from(19), Ok(ScrollKeyAction::Collapse));
        assert_eq!(ScrollKeyAction::try_from(20), Ok(ScrollKeyAction::Commit));
    }

    #[test]
    fn gap_codes_are_rejected() {
        assert_eq!(
            ScrollKeyAction::try_from(18),
            Err(ActionCodeError::UnknownAction(18))
        );
        assert_eq!(
            ScrollKeyAction::try_from(-1),
            Err(ActionCodeError::UnknownAction(-1))
        );
        assert!(ScrollKeyAction::try_from(21).is_err());
    }

    #[test]
    fn code_is_inverse_of_decode() {
        for code in (0..=17).chain([19, 20]) {
            let action = ScrollKeyAction::try_from(code).unwrap();
            assert_eq!(action.code(), code);
        }
    }

    #[test]
    fn scroll_state_tags() {
        assert_eq!(ScrollState::try_from(0), Ok(ScrollState::Closed));
        assert_eq!(ScrollState::try_from(1), Ok(ScrollState::Ready));
        assert_eq!(ScrollState::try_from(2), Ok(ScrollState::Scrolling));
        assert_eq!(
            ScrollState::try_from(3),
            Err(ActionCodeError::UnknownScrollState(3))
        );
    }

    #[test]
    fn only_upward_moves_collapse() {
        assert!(Direction::Up.collapses_at_top());
        assert!(Direction::PageUp.collapses_at_top());
        assert!(!Direction::Down.collapses_at_top());
        assert!(!Direction::Left.collapses_at_top());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ActionCodeError::UnknownAction(42).to_string(),
            "unknown scroll key action code 42"
        );
    }
}

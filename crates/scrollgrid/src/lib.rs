#![forbid(unsafe_code)]

//! Scrolling candidate grid public facade.
//!
//! This crate provides the stable surface for hosts embedding the grid. It
//! re-exports the common types from the internal crates and offers a small
//! prelude.
//!
//! # Example
//! ```
//! use std::time::Instant;
//! use scrollgrid::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = GridConfig::from_style_json(r#"{"ScrollMode":{"MaxColumnCount":"2"}}"#)?;
//!     let mut grid = GridController::new(config, RecordingHost::new())?;
//!     grid.set_candidates(CandidateBatch::new(["A", "B"], ScrollState::Ready))?;
//!     grid.expand()?;
//!     grid.set_candidates(CandidateBatch::scroll_start(["A", "B", "C"]))?;
//!
//!     let down = ScrollKeyAction::try_from(11)?;
//!     grid.handle_event(GridEvent::Key(down), Instant::now())?;
//!     assert_eq!(grid.highlighted(), Some(2));
//!     Ok(())
//! }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use scrollgrid_core::{
    ActionCodeError, ConfigError, Direction, GridConfig, GridEvent, GridGeometry, HoverBehavior,
    LayoutMode, Rect, ScrollKeyAction, ScrollState, Size,
};

// --- Layout re-exports -----------------------------------------------------

pub use scrollgrid_layout::{FlowGrid, GridLayout, RowMap, Separator, SeparatorKind};

// --- Panel re-exports ------------------------------------------------------

pub use scrollgrid_panel::{
    Candidate, CandidateAction, CandidateBatch, CellMarks, CellMetrics, GridController,
    GridError, GridHost, HostCall, LabelFormatter, Paging, Phase, RecordingHost, ScrollRequest,
    TextMetrics, TransitionError, Viewport,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for grid hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The engine rejected a call.
    Grid(GridError),
    /// A style document or geometry was rejected.
    Config(ConfigError),
    /// A host-supplied wire code did not decode.
    Code(ActionCodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Code(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Code(err) => Some(err),
        }
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ActionCodeError> for Error {
    fn from(err: ActionCodeError) -> Self {
        Self::Code(err)
    }
}

impl From<TransitionError> for Error {
    fn from(err: TransitionError) -> Self {
        Self::Grid(GridError::Transition(err))
    }
}

/// Standard result type for grid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Candidate, CandidateBatch, Direction, Error, GridConfig, GridController, GridEvent,
        GridGeometry, GridHost, RecordingHost, Result, ScrollKeyAction, ScrollRequest,
        ScrollState,
    };

    pub use crate::{core, layout, panel};
}

pub use scrollgrid_core as core;
pub use scrollgrid_layout as layout;
pub use scrollgrid_panel as panel;

#![forbid(unsafe_code)]

//! Scrolling candidate grid engine.
//!
//! # Role
//! `scrollgrid-panel` is the stateful half of the grid. It receives candidate
//! batches and input from an input-method host, keeps the highlighted cell and
//! its row ranks, decides when to fetch more candidates, and drives the
//! expand/collapse sequence. Outbound effects go through [`GridHost`].
//!
//! # Components
//! - [`neighbor`] resolves directional moves over ragged rows.
//! - [`highlight`] owns the highlighted index, rank labels, and cell markers.
//! - [`prefetch`] keeps at most one fetch outstanding.
//! - [`expand`] is the Closed/Ready/Scrolling state machine.
//! - [`controller`] ties them to a layout and a host.
//!
//! # Example
//! ```
//! use std::time::Instant;
//! use scrollgrid_core::{Direction, GridConfig, ScrollKeyAction, ScrollState};
//! use scrollgrid_panel::{CandidateBatch, GridController, RecordingHost};
//!
//! let mut grid = GridController::new(GridConfig::default(), RecordingHost::new())?;
//! grid.set_candidates(CandidateBatch::new(["a", "b", "c"], ScrollState::Ready))?;
//! grid.expand()?;
//! grid.set_candidates(CandidateBatch::scroll_start(["a", "b", "c", "d"]))?;
//! grid.scroll_key_action(ScrollKeyAction::Move(Direction::Right), Instant::now());
//! assert_eq!(grid.highlighted(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod candidate;
pub mod controller;
pub mod expand;
pub mod highlight;
pub mod host;
pub mod label;
pub mod metrics;
pub mod neighbor;
pub mod prefetch;
pub mod viewport;

pub use candidate::{Candidate, CandidateAction, CandidateBatch};
pub use controller::{GridController, GridError, Paging};
pub use expand::{ExpandController, Phase, TransitionError};
pub use highlight::{CellMarks, HighlightTracker};
pub use host::{GridHost, HostCall, RecordingHost, ScrollRequest};
pub use label::LabelFormatter;
pub use metrics::{CellMetrics, TextMetrics};
pub use prefetch::PrefetchController;
pub use viewport::Viewport;

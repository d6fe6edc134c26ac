#![forbid(unsafe_code)]

//! Expand/collapse state machine.
//!
//! ```text
//!   Closed --Ready batch--> Ready --expand()--> Expanding --scroll-start batch--> Scrolling
//!     ^                                                                            |
//!     |                       collapse(animate = false)                            |
//!     +------------------------------------------------------------------------------+
//!     |                                                                            |
//!     +--tick() past deadline-- Collapsing <------- collapse(animate = true) ------+
//! ```
//!
//! A discard scheduled by an animated collapse is not cancelled by batches
//! that arrive before its deadline; it fires on the first [`ExpandController::tick`]
//! at or after the deadline. Only one collapse may be in flight.

use std::fmt;
use std::time::{Duration, Instant};

use scrollgrid_core::ScrollState;

use crate::host::ScrollRequest;

/// Macro-state of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No grid.
    #[default]
    Closed,
    /// Single row with the expand affordance.
    Ready,
    /// Expand requested; waiting for the first scrolling batch.
    Expanding,
    /// Full grid active.
    Scrolling,
    /// Shrink animation running; discard pending.
    Collapsing,
}

/// An expand or collapse that the current phase does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// Expand requires the `Ready` phase.
    NotReady(Phase),
    /// Collapse requires the `Scrolling` phase.
    NotScrolling(Phase),
    /// A collapse is already in flight.
    AlreadyCollapsing,
    /// A continuation batch arrived while no grid is shown.
    ContinuationWithoutGrid(Phase),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(phase) => write!(f, "cannot expand in phase {phase:?}"),
            Self::NotScrolling(phase) => write!(f, "cannot collapse in phase {phase:?}"),
            Self::AlreadyCollapsing => write!(f, "a collapse is already in flight"),
            Self::ContinuationWithoutGrid(phase) => {
                write!(f, "continuation batch received in phase {phase:?}")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// Drives expand/collapse and tracks the heights the animation needs.
#[derive(Debug, Clone, Default)]
pub struct ExpandController {
    phase: Phase,
    discard_at: Option<Instant>,
    /// Height the viewport shrinks to when collapsing.
    collapse_height: f32,
    /// Last non-zero row height seen.
    stable_row_height: f32,
    /// Viewport height cap imposed by a running collapse.
    max_height_override: Option<f32>,
}

impl ExpandController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A discard is scheduled and has not fired yet.
    #[inline]
    #[must_use]
    pub fn is_discard_pending(&self) -> bool {
        self.discard_at.is_some()
    }

    #[must_use]
    pub fn discard_deadline(&self) -> Option<Instant> {
        self.discard_at
    }

    #[must_use]
    pub fn collapse_height(&self) -> f32 {
        self.collapse_height
    }

    #[must_use]
    pub fn stable_row_height(&self) -> f32 {
        self.stable_row_height
    }

    #[must_use]
    pub fn max_height_override(&self) -> Option<f32> {
        self.max_height_override
    }

    /// Replace the cached heights with `row_height` after a geometry change.
    ///
    /// A `Ready` layout measures over it; a scrolling grid collapses to it.
    pub fn reseed_heights(&mut self, row_height: f32) {
        self.collapse_height = row_height;
        self.stable_row_height = row_height;
    }

    /// Follow the scroll state of an incoming batch.
    pub fn on_batch(
        &mut self,
        state: ScrollState,
        continuation: bool,
    ) -> Result<(), TransitionError> {
        let next = match state {
            ScrollState::Closed => Phase::Closed,
            ScrollState::Ready => Phase::Ready,
            ScrollState::Scrolling if continuation => match self.phase {
                Phase::Scrolling | Phase::Collapsing => self.phase,
                other => return Err(TransitionError::ContinuationWithoutGrid(other)),
            },
            ScrollState::Scrolling if self.discard_at.is_some() => Phase::Collapsing,
            ScrollState::Scrolling => Phase::Scrolling,
        };
        if matches!(next, Phase::Closed | Phase::Ready) {
            self.max_height_override = None;
        }
        if next != self.phase {
            tracing::debug!(from = ?self.phase, to = ?next, "grid phase change");
        }
        self.phase = next;
        Ok(())
    }

    /// Request the expanded grid: the visible rows plus one hidden row.
    pub fn expand(&mut self, expand_len: usize) -> Result<ScrollRequest, TransitionError> {
        if self.discard_at.is_some() {
            return Err(TransitionError::AlreadyCollapsing);
        }
        if self.phase != Phase::Ready {
            return Err(TransitionError::NotReady(self.phase));
        }
        tracing::debug!(length = expand_len, "expand requested");
        self.phase = Phase::Expanding;
        Ok(ScrollRequest::Fetch {
            start: 0,
            length: expand_len,
        })
    }

    /// Start a collapse.
    ///
    /// Without animation the discard is returned for immediate delivery.
    /// With animation the viewport is capped to the collapse height and the
    /// discard is deferred until `now + delay`.
    pub fn collapse(
        &mut self,
        now: Instant,
        animate: bool,
        delay: Duration,
    ) -> Result<Option<ScrollRequest>, TransitionError> {
        if self.discard_at.is_some() {
            return Err(TransitionError::AlreadyCollapsing);
        }
        if self.phase != Phase::Scrolling {
            return Err(TransitionError::NotScrolling(self.phase));
        }
        if animate {
            self.max_height_override = Some(self.collapse_height);
            self.discard_at = Some(now + delay);
            self.phase = Phase::Collapsing;
            tracing::debug!(
                height = self.collapse_height,
                delay_ms = delay.as_millis() as u64,
                "collapse animation started"
            );
            Ok(None)
        } else {
            self.phase = Phase::Closed;
            tracing::debug!("collapse without animation, discarding");
            Ok(Some(ScrollRequest::Discard))
        }
    }

    /// Fire a due discard.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollRequest> {
        let deadline = self.discard_at?;
        if now < deadline {
            return None;
        }
        self.discard_at = None;
        if self.phase == Phase::Collapsing {
            self.phase = Phase::Closed;
        }
        tracing::debug!("collapse delay elapsed, discarding");
        Some(ScrollRequest::Discard)
    }

    /// Record the single-row height observed while `Ready`.
    ///
    /// The cached collapse height never drops below the last stable value,
    /// since the first row can measure zero before it settles.
    pub fn observe_row_height(&mut self, measured: f32) {
        if self.phase != Phase::Ready {
            return;
        }
        self.collapse_height = self.stable_row_height.max(measured);
        if measured > 0.0 {
            self.stable_row_height = measured;
        }
    }
}

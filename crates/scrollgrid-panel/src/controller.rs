#![forbid(unsafe_code)]

//! The per-panel grid controller.
//!
//! [`GridController`] owns every piece of mutable grid state: candidates,
//! layout, highlight, viewport, prefetch lock, and the expand/collapse phase.
//! All mutation happens synchronously inside one call; outbound effects go to
//! the [`GridHost`] it was built with.
//!
//! # Layout sources
//!
//! In [`LayoutMode::Flow`] the controller measures candidates through its
//! [`CellMetrics`] and lays them out immediately. In [`LayoutMode::Measured`]
//! a new batch leaves the layout pending until the host reports rendered boxes
//! through [`GridController::apply_measurement`]; prefetch is suppressed
//! meanwhile.
//!
//! # Errors
//!
//! Keyboard and pointer paths never fail: a rejected transition is logged and
//! ignored. Explicit calls ([`GridController::expand`],
//! [`GridController::collapse`], [`GridController::set_candidates`]) report
//! what went wrong through [`GridError`].

use std::fmt;
use std::time::Instant;

use scrollgrid_core::{
    ConfigError, Direction, GridConfig, GridEvent, GridGeometry, HoverBehavior, LayoutMode, Rect,
    ScrollKeyAction, ScrollState, Size,
};
use scrollgrid_layout::{FlowGrid, GridLayout, partition_measured};

use crate::candidate::{Candidate, CandidateBatch};
use crate::expand::{ExpandController, Phase, TransitionError};
use crate::highlight::{CellMarks, HighlightTracker};
use crate::host::GridHost;
use crate::label::LabelFormatter;
use crate::metrics::{CellMetrics, TextMetrics};
use crate::neighbor;
use crate::prefetch::PrefetchController;
use crate::viewport::Viewport;

/// Failure of an explicit controller call.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The expand/collapse phase does not allow the request.
    Transition(TransitionError),
    /// Reported boxes do not match the rendered candidates.
    Measurement { expected: usize, got: usize },
    /// New geometry or style was rejected.
    Config(ConfigError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transition(e) => write!(f, "transition rejected: {e}"),
            Self::Measurement { expected, got } => {
                write!(f, "measured {got} cell boxes, expected {expected}")
            }
            Self::Config(e) => write!(f, "configuration rejected: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transition(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Measurement { .. } => None,
        }
    }
}

impl From<TransitionError> for GridError {
    fn from(e: TransitionError) -> Self {
        Self::Transition(e)
    }
}

impl From<ConfigError> for GridError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Paging flags of a flat batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paging {
    pub pageable: bool,
    pub has_prev: bool,
    pub has_next: bool,
}

/// What the next completed layout pass should do with the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutPass {
    /// Closed or Ready batch: host highlight, no ranks.
    Flat { original: Option<usize> },
    /// First scrolling batch: highlight the first cell and tell the host.
    ScrollStart,
    /// Same candidates (continuation, resize): keep the highlight, re-rank.
    Refresh,
}

/// Scrolling candidate grid for one panel.
pub struct GridController<H: GridHost, M: CellMetrics = TextMetrics> {
    config: GridConfig,
    host: H,
    metrics: M,
    candidates: Vec<Candidate>,
    paging: Paging,
    layout: GridLayout,
    /// Set while a measured layout is outstanding.
    pending: Option<LayoutPass>,
    highlight: HighlightTracker,
    viewport: Viewport,
    prefetch: PrefetchController,
    expand: ExpandController,
}

impl<H: GridHost> GridController<H> {
    /// Controller with display-width text metrics.
    pub fn new(config: GridConfig, host: H) -> Result<Self, ConfigError> {
        Self::with_metrics(config, host, TextMetrics::default())
    }
}

impl<H: GridHost, M: CellMetrics> GridController<H, M> {
    /// Controller with custom cell metrics.
    pub fn with_metrics(config: GridConfig, host: H, metrics: M) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            metrics,
            candidates: Vec::new(),
            paging: Paging::default(),
            layout: GridLayout::empty(),
            pending: None,
            highlight: HighlightTracker::new(),
            viewport: Viewport::default(),
            prefetch: PrefetchController::new(),
            expand: ExpandController::new(),
        })
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the controller, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn paging(&self) -> Paging {
        self.paging
    }

    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight.highlighted()
    }

    #[must_use]
    pub fn highlight(&self) -> &HighlightTracker {
        &self.highlight
    }

    #[must_use]
    pub fn marks(&self, index: usize) -> CellMarks {
        self.highlight.marks(index)
    }

    /// Rank label of cell `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.highlight.label(index)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.expand.phase()
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.prefetch.is_fetching()
    }

    #[must_use]
    pub fn scroll_end(&self) -> bool {
        self.prefetch.scroll_end()
    }

    /// A measured layout is outstanding.
    #[must_use]
    pub fn awaiting_measurement(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of a scheduled discard, for hosts that drive [`Self::tick`] from a timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.expand.discard_deadline()
    }

    // --- Inbound: batches and geometry ---

    /// Accept a candidate batch.
    ///
    /// Any batch releases the prefetch lock, including one that is rejected.
    pub fn set_candidates(&mut self, batch: CandidateBatch) -> Result<(), GridError> {
        let continuation = batch.is_continuation();
        let _span = tracing::debug_span!(
            "set_candidates",
            len = batch.len(),
            state = ?batch.scroll_state,
            continuation
        )
        .entered();

        self.prefetch.complete(batch.scroll_end);
        self.expand.on_batch(batch.scroll_state, continuation)?;
        self.paging = Paging {
            pageable: batch.pageable,
            has_prev: batch.has_prev,
            has_next: batch.has_next,
        };

        let pass = if continuation {
            self.candidates.extend(batch.candidates);
            LayoutPass::Refresh
        } else {
            if batch.scroll_state == ScrollState::Ready {
                let labels: Vec<&str> = batch.candidates.iter().map(|c| c.label.as_str()).collect();
                self.highlight.set_formatter(LabelFormatter::guess(&labels));
            }
            self.candidates = batch.candidates;
            self.highlight.reset(self.candidates.len());
            self.viewport.scroll_top = 0.0;
            if batch.scroll_state == ScrollState::Scrolling {
                LayoutPass::ScrollStart
            } else {
                LayoutPass::Flat {
                    original: batch.highlighted,
                }
            }
        };

        match self.config.layout_mode {
            LayoutMode::Flow => {
                self.layout = self.flow_layout();
                self.finish_layout(pass);
            }
            LayoutMode::Measured => {
                if !continuation {
                    self.layout = GridLayout::empty();
                }
                // A continuation keeps an unmeasured scroll start.
                if !(continuation && self.pending == Some(LayoutPass::ScrollStart)) {
                    self.pending = Some(pass);
                }
            }
        }
        Ok(())
    }

    /// Supply rendered boxes for a measured layout.
    ///
    /// `cells` must hold one box per candidate in grid order; `separators`
    /// holds the trailing separator boxes and may be shorter.
    pub fn apply_measurement(
        &mut self,
        cells: &[Rect],
        separators: &[Rect],
    ) -> Result<(), GridError> {
        if cells.len() != self.candidates.len() {
            return Err(GridError::Measurement {
                expected: self.candidates.len(),
                got: cells.len(),
            });
        }
        let _span = tracing::debug_span!("measured_layout", cells = cells.len()).entered();
        self.layout = partition_measured(
            cells,
            separators,
            &self.config.geometry,
            self.prefetch.scroll_end(),
        );
        let pass = self.pending.take().unwrap_or(LayoutPass::Refresh);
        self.finish_layout(pass);
        Ok(())
    }

    /// Switch to new grid geometry and lay out again.
    pub fn set_geometry(&mut self, geometry: GridGeometry) -> Result<(), ConfigError> {
        geometry.validate()?;
        tracing::debug!(?geometry, "grid geometry changed");
        self.config.geometry = geometry;
        self.expand.reseed_heights(geometry.row_height);
        self.refresh_layout();
        Ok(())
    }

    /// Apply a style document; geometry changes re-run layout.
    pub fn apply_style_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let before = self.config.geometry;
        self.config.apply_style_json(json)?;
        if self.config.geometry != before {
            self.expand.reseed_heights(self.config.geometry.row_height);
            self.refresh_layout();
        }
        Ok(())
    }

    fn refresh_layout(&mut self) {
        match self.config.layout_mode {
            LayoutMode::Flow => {
                self.layout = self.flow_layout();
                self.finish_layout(LayoutPass::Refresh);
            }
            LayoutMode::Measured => {
                if self.pending.is_none() {
                    self.pending = Some(LayoutPass::Refresh);
                }
            }
        }
    }

    fn flow_layout(&self) -> GridLayout {
        let geometry = self.config.geometry;
        let _span = tracing::debug_span!("flow_layout", cells = self.candidates.len()).entered();
        let max_width = geometry.row_width();
        let sizes: Vec<Size> = self
            .candidates
            .iter()
            .map(|c| self.metrics.measure(c, max_width))
            .collect();
        let layout = FlowGrid::new(geometry).layout(&sizes, self.prefetch.scroll_end());
        tracing::debug!(rows = layout.row_map.row_count(), "layout complete");
        layout
    }

    fn finish_layout(&mut self, pass: LayoutPass) {
        let count = self.layout.cell_count();
        match pass {
            LayoutPass::Flat { original } => {
                self.highlight.mark_flat(original);
                if count > 0 {
                    let index = original.filter(|&i| i < count).unwrap_or(0);
                    self.highlight.highlight_flat(index);
                }
                self.expand.observe_row_height(self.layout.row_height(0));
            }
            LayoutPass::ScrollStart => {
                if count > 0 {
                    self.highlight.set_highlight(&self.layout, 0, false);
                    self.host.highlight(0);
                }
            }
            LayoutPass::Refresh => {
                self.highlight.extend_to(count);
                match self.expand.phase() {
                    Phase::Scrolling | Phase::Collapsing => {
                        self.highlight.clear_ranks();
                        let index = self.highlight.highlighted().filter(|&i| i < count);
                        if let Some(index) = index.or((count > 0).then_some(0)) {
                            self.highlight.set_highlight(&self.layout, index, false);
                        }
                    }
                    Phase::Ready => self.expand.observe_row_height(self.layout.row_height(0)),
                    Phase::Closed | Phase::Expanding => {}
                }
            }
        }
        self.update_viewport();
        if !matches!(pass, LayoutPass::Flat { .. })
            && let Some(cell) = self.highlighted_cell()
        {
            self.viewport.scroll_into_view(cell);
        }
        self.host.natural_height(self.layout.content_height());
    }

    fn highlighted_cell(&self) -> Option<Rect> {
        self.highlight
            .highlighted()
            .and_then(|i| self.layout.cell(i))
    }

    fn update_viewport(&mut self) {
        let content = self.layout.content_height();
        let height = match self.expand.phase() {
            Phase::Closed => content,
            Phase::Ready => self.layout.row_height(0),
            Phase::Expanding | Phase::Scrolling | Phase::Collapsing => {
                let row = self
                    .layout
                    .row_height(0)
                    .max(self.expand.stable_row_height());
                let cap = row * self.config.geometry.max_rows as f32;
                let cap = match self.expand.max_height_override() {
                    Some(limit) if limit > 0.0 => cap.min(limit),
                    _ => cap,
                };
                content.min(cap)
            }
        };
        self.viewport.resize(height, content);
    }

    // --- Inbound: input ---

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: GridEvent, now: Instant) -> Result<(), GridError> {
        match event {
            GridEvent::Key(action) => self.scroll_key_action(action, now),
            GridEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            GridEvent::Click(index) => self.on_click(index),
            GridEvent::Hover(index) => self.on_hover(index),
            GridEvent::PointerLeave => self.pointer_leave(),
            GridEvent::Expand => self.expand()?,
            GridEvent::Resize(geometry) => self.set_geometry(geometry)?,
        }
        Ok(())
    }

    /// Handle a keyboard command while the grid is scrolling.
    pub fn scroll_key_action(&mut self, action: ScrollKeyAction, now: Instant) {
        if self.expand.phase() != Phase::Scrolling {
            tracing::trace!(?action, phase = ?self.expand.phase(), "key ignored outside scrolling");
            return;
        }
        match action {
            ScrollKeyAction::Select(digit) => {
                match self.highlight.index_for_digit(&self.layout, digit) {
                    Some(index) => self.host.select(index),
                    None => tracing::trace!(digit, "no cell for digit in active row"),
                }
            }
            ScrollKeyAction::Move(direction) => self.move_highlight(direction, now),
            ScrollKeyAction::Collapse => {
                if let Err(e) = self.collapse(now) {
                    tracing::debug!(error = %e, "collapse key ignored");
                }
            }
            ScrollKeyAction::Commit => {
                if let Some(index) = self.highlight.highlighted() {
                    self.host.select(index);
                }
            }
        }
    }

    fn move_highlight(&mut self, direction: Direction, now: Instant) {
        let Some(current) = self.highlight.highlighted() else {
            return;
        };
        let geometry = self.config.geometry;
        match neighbor::resolve(&self.layout, current, direction, geometry.max_rows) {
            Some(next) => {
                self.highlight.set_highlight(&self.layout, next, true);
                if let Some(cell) = self.layout.cell(next) {
                    self.viewport.scroll_into_view(cell);
                }
                self.host.highlight(next);
                let request = if self.pending.is_some() {
                    tracing::trace!("key prefetch suppressed during measurement");
                    None
                } else {
                    self.prefetch.after_move(&self.layout, next, &geometry)
                };
                if let Some(request) = request {
                    self.host.scroll(request);
                }
            }
            None if direction.collapses_at_top() && self.layout.row_map.row_of(current) == 0 => {
                tracing::debug!(?direction, "move past top row, collapsing");
                if let Err(e) = self.collapse(now) {
                    tracing::debug!(error = %e, "collapse at top ignored");
                }
            }
            None => tracing::trace!(current, ?direction, "no neighbor"),
        }
    }

    /// Scroll the viewport by a wheel delta and check the prefetch boundary.
    pub fn on_wheel(&mut self, delta_y: f32) {
        if self.expand.phase() != Phase::Scrolling || self.layout.is_empty() {
            return;
        }
        let content = self.layout.content_height();
        self.viewport.scroll_by(delta_y, content);
        if self.pending.is_some() {
            tracing::trace!("wheel prefetch suppressed during measurement");
            return;
        }
        let layout = &self.layout;
        let geometry = self.config.geometry;
        if let Some(request) = self.prefetch.on_wheel(layout, &self.viewport, &geometry) {
            self.host.scroll(request);
        }
    }

    /// A click on candidate `index` selects it.
    pub fn on_click(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.host.select(index);
        }
    }

    /// Pointer moved over candidate `index`.
    pub fn on_hover(&mut self, index: usize) {
        if index >= self.layout.cell_count() {
            return;
        }
        match self.config.hover {
            HoverBehavior::None => {}
            HoverBehavior::Move => self.highlight.move_marker(index),
            HoverBehavior::Add => self.highlight.set_hover(Some(index)),
        }
    }

    /// Pointer left the grid.
    pub fn pointer_leave(&mut self) {
        self.highlight.restore_marker();
    }

    // --- Expand/collapse ---

    /// Request the expanded grid.
    pub fn expand(&mut self) -> Result<(), GridError> {
        let request = self
            .expand
            .expand(self.config.geometry.expand_len())
            .inspect_err(|e| tracing::debug!(error = %e, "expand rejected"))?;
        self.host.scroll(request);
        Ok(())
    }

    /// Shrink back to the single-row view.
    pub fn collapse(&mut self, now: Instant) -> Result<(), GridError> {
        let request = self
            .expand
            .collapse(now, self.config.animation, self.config.collapse_delay)
            .inspect_err(|e| tracing::debug!(error = %e, "collapse rejected"))?;
        if let Some(request) = request {
            self.host.scroll(request);
        }
        self.update_viewport();
        Ok(())
    }

    /// Advance time; fires a scheduled discard once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(request) = self.expand.tick(now) {
            self.host.scroll(request);
            self.update_viewport();
        }
    }
}

impl<H: GridHost + fmt::Debug, M: CellMetrics> fmt::Debug for GridController<H, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("host", &self.host)
            .field("candidates", &self.candidates.len())
            .field("rows", &self.layout.row_map.as_slice())
            .field("highlighted", &self.highlight.highlighted())
            .field("phase", &self.expand.phase())
            .field("fetching", &self.prefetch.is_fetching())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost, ScrollRequest};
    use std::time::Duration;

    fn fixed(_: &Candidate, _: f32) -> Size {
        Size::new(50.0, 30.0)
    }

    type Fixed = fn(&Candidate, f32) -> Size;

    fn controller(config: GridConfig) -> GridController<RecordingHost, Fixed> {
        GridController::with_metrics(config, RecordingHost::new(), fixed as Fixed).unwrap()
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    fn scrolling(n: usize, config: GridConfig) -> GridController<RecordingHost, Fixed> {
        let mut c = controller(config);
        c.set_candidates(CandidateBatch::new(names(6), ScrollState::Ready))
            .unwrap();
        c.expand().unwrap();
        c.set_candidates(CandidateBatch::scroll_start(names(n)))
            .unwrap();
        c.host_mut().take();
        c
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GridConfig::default().with_geometry(GridGeometry {
            max_rows: 0,
            ..GridGeometry::default()
        });
        assert!(GridController::new(config, RecordingHost::new()).is_err());
    }

    #[test]
    fn flat_batch_uses_host_highlight() {
        let mut c = controller(GridConfig::default());
        c.set_candidates(CandidateBatch::new(names(3), ScrollState::Closed).highlighted(Some(2)))
            .unwrap();
        assert_eq!(c.highlighted(), Some(2));
        assert!(c.marks(2).contains(CellMarks::HIGHLIGHTED_ORIGINAL));
        assert!(c.marks(0).contains(CellMarks::FIRST));
        assert!(c.host().highlights().is_empty());
    }

    #[test]
    fn expand_requests_hidden_row() {
        let mut c = controller(GridConfig::default());
        c.set_candidates(CandidateBatch::new(names(6), ScrollState::Ready))
            .unwrap();
        c.expand().unwrap();
        assert_eq!(
            c.host().scrolls(),
            vec![ScrollRequest::Fetch { start: 0, length: 42 }]
        );
        assert_eq!(c.phase(), Phase::Expanding);
    }

    #[test]
    fn scroll_start_highlights_first_and_notifies() {
        let mut c = controller(GridConfig::default());
        c.set_candidates(CandidateBatch::new(names(6), ScrollState::Ready))
            .unwrap();
        c.expand().unwrap();
        c.set_candidates(CandidateBatch::scroll_start(names(20)))
            .unwrap();
        assert_eq!(c.highlighted(), Some(0));
        assert_eq!(c.host().highlights(), vec![0]);
        assert_eq!(c.phase(), Phase::Scrolling);
    }

    #[test]
    fn key_moves_notify_host() {
        let mut c = scrolling(20, GridConfig::default());
        let now = Instant::now();
        c.scroll_key_action(ScrollKeyAction::Move(Direction::Right), now);
        assert_eq!(c.highlighted(), Some(1));
        assert_eq!(c.host().highlights(), vec![1]);
    }

    #[test]
    fn commit_and_digit_select() {
        let mut c = scrolling(20, GridConfig::default());
        let now = Instant::now();
        c.scroll_key_action(ScrollKeyAction::Move(Direction::Right), now);
        c.scroll_key_action(ScrollKeyAction::Commit, now);
        c.scroll_key_action(ScrollKeyAction::Select(3), now);
        assert_eq!(c.host().selections(), vec![1, 2]);
    }

    #[test]
    fn continuation_keeps_highlight() {
        let mut c = scrolling(7, GridConfig::default());
        let now = Instant::now();
        c.scroll_key_action(ScrollKeyAction::Move(Direction::Down), now);
        assert_eq!(c.highlighted(), Some(6));
        assert!(c.is_fetching());
        c.set_candidates(CandidateBatch::continuation(names(36)))
            .unwrap();
        assert!(!c.is_fetching());
        assert_eq!(c.candidates().len(), 43);
        assert_eq!(c.highlighted(), Some(6));
        assert_eq!(c.label(6), Some("1"));
        assert_eq!(c.label(0), Some("0"));
        assert_eq!(c.highlight().marker_count(), 1);
    }

    #[test]
    fn continuation_without_grid_is_rejected() {
        let mut c = controller(GridConfig::default());
        let err = c
            .set_candidates(CandidateBatch::continuation(names(3)))
            .unwrap_err();
        assert!(matches!(err, GridError::Transition(_)));
    }

    #[test]
    fn collapse_key_with_animation_defers_discard() {
        let mut c = scrolling(20, GridConfig::default());
        let now = Instant::now();
        c.scroll_key_action(ScrollKeyAction::Collapse, now);
        assert!(c.host().scrolls().is_empty());
        assert_eq!(c.phase(), Phase::Collapsing);
        c.tick(now + Duration::from_millis(100));
        assert!(c.host().scrolls().is_empty());
        c.tick(now + Duration::from_millis(290));
        assert_eq!(c.host().scrolls(), vec![ScrollRequest::Discard]);
    }

    #[test]
    fn collapse_shrinks_viewport_to_ready_height() {
        let mut c = scrolling(40, GridConfig::default());
        assert_eq!(c.viewport().height, 180.0);
        c.collapse(Instant::now()).unwrap();
        assert_eq!(c.viewport().height, 30.0);
    }

    #[test]
    fn keys_ignored_outside_scrolling() {
        let mut c = controller(GridConfig::default());
        c.set_candidates(CandidateBatch::new(names(6), ScrollState::Ready))
            .unwrap();
        c.scroll_key_action(ScrollKeyAction::Commit, Instant::now());
        assert!(c.host().selections().is_empty());
    }

    #[test]
    fn wheel_scrolls_and_prefetches() {
        // 10 rows of 6 at 30px; viewport shows 6 rows.
        let mut c = scrolling(60, GridConfig::default());
        c.on_wheel(30.0);
        assert_eq!(c.viewport().scroll_top, 30.0);
        // Rows starting at or below 210: rows 7, 8, 9.
        assert_eq!(
            c.host().scrolls(),
            vec![ScrollRequest::Fetch { start: 60, length: 36 }]
        );
    }

    #[test]
    fn hover_move_and_leave() {
        let mut c = scrolling(12, GridConfig::default().with_hover(HoverBehavior::Move));
        c.on_hover(4);
        assert_eq!(c.highlight().marker(), Some(4));
        assert_eq!(c.highlighted(), Some(0));
        assert!(c.host().highlights().is_empty());
        c.pointer_leave();
        assert_eq!(c.highlight().marker(), Some(0));
    }

    #[test]
    fn hover_none_changes_nothing() {
        let mut c = scrolling(12, GridConfig::default());
        c.on_hover(4);
        assert_eq!(c.highlight().marker(), Some(0));
        assert_eq!(c.highlight().hovered(), None);
    }

    #[test]
    fn click_selects() {
        let mut c = scrolling(12, GridConfig::default());
        c.on_click(5);
        c.on_click(50);
        assert_eq!(c.host().selections(), vec![5]);
    }

    #[test]
    fn resize_relayouts() {
        let mut c = scrolling(12, GridConfig::default());
        let g = GridGeometry {
            max_columns: 4,
            ..GridGeometry::default()
        };
        c.handle_event(GridEvent::Resize(g), Instant::now())
            .unwrap();
        assert_eq!(c.layout().row_map.as_slice(), &[4, 4, 4]);
        assert_eq!(c.highlighted(), Some(0));
    }

    #[test]
    fn invalid_resize_is_rejected() {
        let mut c = scrolling(12, GridConfig::default());
        let g = GridGeometry {
            max_columns: 0,
            ..GridGeometry::default()
        };
        let err = c.handle_event(GridEvent::Resize(g), Instant::now())
            .unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
        assert_eq!(c.config().geometry.max_columns, 6);
    }

    #[test]
    fn measured_mode_waits_for_boxes() {
        let config = GridConfig::default().with_layout_mode(LayoutMode::Measured);
        let mut c = controller(config);
        c.set_candidates(CandidateBatch::new(names(3), ScrollState::Ready))
            .unwrap();
        assert!(c.awaiting_measurement());
        assert!(c.layout().is_empty());

        let cells: Vec<Rect> = (0..3)
            .map(|i| Rect::new(i as f32 * 65.0, 0.0, 65.0, 30.0))
            .collect();
        assert_eq!(
            c.apply_measurement(&cells[..2], &[]),
            Err(GridError::Measurement { expected: 3, got: 2 })
        );
        c.apply_measurement(&cells, &[]).unwrap();
        assert!(!c.awaiting_measurement());
        assert_eq!(c.layout().row_map.as_slice(), &[3]);
        assert_eq!(c.host().last_natural_height(), Some(30.0));
    }

    #[test]
    fn natural_height_reported_after_layout() {
        let mut c = controller(GridConfig::default());
        c.set_candidates(CandidateBatch::new(names(6), ScrollState::Ready))
            .unwrap();
        assert_eq!(c.host().calls(), &[HostCall::NaturalHeight(30.0)]);
    }

    #[test]
    fn error_display_and_source() {
        use std::error::Error;
        let e = GridError::from(TransitionError::AlreadyCollapsing);
        assert!(e.to_string().contains("already in flight"));
        assert!(e.source().is_some());
        let e = GridError::Measurement { expected: 3, got: 1 };
        assert!(e.source().is_none());
    }
}

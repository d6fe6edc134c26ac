#![forbid(unsafe_code)]

//! Outbound boundary to the input-method host.
//!
//! Every call is fire-and-forget: the engine never waits for an answer. The
//! only reply it relies on is the next candidate batch, which is what clears
//! the prefetch lock.

/// A request for candidate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollRequest {
    /// Send `length` candidates starting at `start`.
    Fetch { start: usize, length: usize },
    /// Drop all scroll data; the grid is collapsing.
    Discard,
}

impl ScrollRequest {
    /// The `(start, length)` pair the host expects; discard is `(-1, 0)`.
    #[must_use]
    pub fn wire(self) -> (i64, usize) {
        match self {
            Self::Fetch { start, length } => (start as i64, length),
            Self::Discard => (-1, 0),
        }
    }
}

/// Receiver of engine output.
pub trait GridHost {
    /// The user committed candidate `index`.
    fn select(&mut self, index: usize);

    /// The highlighted candidate changed through the keyboard or an expand.
    fn highlight(&mut self, index: usize);

    /// More candidates are needed, or scroll data should be dropped.
    fn scroll(&mut self, request: ScrollRequest);

    /// Natural height of the grid content, for window-chrome sizing.
    fn natural_height(&mut self, _height: f32) {}
}

/// One recorded outbound call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCall {
    Select(usize),
    Highlight(usize),
    Scroll(ScrollRequest),
    NaturalHeight(f32),
}

/// A host that records every call, for tests and debugging.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain recorded calls.
    pub fn take(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Indices passed to `select`.
    #[must_use]
    pub fn selections(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Select(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    /// Indices passed to `highlight`.
    #[must_use]
    pub fn highlights(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Highlight(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    /// Requests passed to `scroll`.
    #[must_use]
    pub fn scrolls(&self) -> Vec<ScrollRequest> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Scroll(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Last reported natural height.
    #[must_use]
    pub fn last_natural_height(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::NaturalHeight(h) => Some(*h),
            _ => None,
        })
    }
}

impl GridHost for RecordingHost {
    fn select(&mut self, index: usize) {
        self.calls.push(HostCall::Select(index));
    }

    fn highlight(&mut self, index: usize) {
        self.calls.push(HostCall::Highlight(index));
    }

    fn scroll(&mut self, request: ScrollRequest) {
        self.calls.push(HostCall::Scroll(request));
    }

    fn natural_height(&mut self, height: f32) {
        self.calls.push(HostCall::NaturalHeight(height));
    }
}

impl<H: GridHost + ?Sized> GridHost for &mut H {
    fn select(&mut self, index: usize) {
        (**self).select(index);
    }

    fn highlight(&mut self, index: usize) {
        (**self).highlight(index);
    }

    fn scroll(&mut self, request: ScrollRequest) {
        (**self).scroll(request);
    }

    fn natural_height(&mut self, height: f32) {
        (**self).natural_height(height);
    }
}

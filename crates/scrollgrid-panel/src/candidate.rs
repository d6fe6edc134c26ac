#![forbid(unsafe_code)]

//! Candidate model.
//!
//! A candidate has no identity beyond its index in the batch that delivered
//! it. Batches replace each other wholesale, except for a scrolling
//! continuation which appends.

use scrollgrid_core::ScrollState;
use serde::Deserialize;

/// An extra action offered for a candidate (e.g. "forget this word").
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CandidateAction {
    pub id: i32,
    pub text: String,
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub text: String,
    pub label: String,
    pub comment: String,
    pub actions: Vec<CandidateAction>,
}

impl Candidate {
    /// A candidate with only text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set the actions.
    #[must_use]
    pub fn actions(mut self, actions: Vec<CandidateAction>) -> Self {
        self.actions = actions;
        self
    }
}

impl From<&str> for Candidate {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Candidate {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Candidates delivered by one host call, with the panel flags that came with them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateBatch {
    pub candidates: Vec<Candidate>,
    /// Host-side highlight; only meaningful outside scrolling.
    pub highlighted: Option<usize>,
    pub pageable: bool,
    pub has_prev: bool,
    pub has_next: bool,
    pub scroll_state: ScrollState,
    /// First batch of a scroll session (as opposed to a continuation).
    pub scroll_start: bool,
    /// No candidates exist beyond this batch.
    pub scroll_end: bool,
}

impl CandidateBatch {
    /// A batch in the given scroll state.
    pub fn new(
        candidates: impl IntoIterator<Item = impl Into<Candidate>>,
        scroll_state: ScrollState,
    ) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            scroll_state,
            ..Self::default()
        }
    }

    /// The first batch of a scroll session.
    pub fn scroll_start(candidates: impl IntoIterator<Item = impl Into<Candidate>>) -> Self {
        Self::new(candidates, ScrollState::Scrolling).starting(true)
    }

    /// A continuation appending to the current grid.
    pub fn continuation(candidates: impl IntoIterator<Item = impl Into<Candidate>>) -> Self {
        Self::new(candidates, ScrollState::Scrolling)
    }

    #[must_use]
    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    #[must_use]
    pub fn paging(mut self, pageable: bool, has_prev: bool, has_next: bool) -> Self {
        self.pageable = pageable;
        self.has_prev = has_prev;
        self.has_next = has_next;
        self
    }

    #[must_use]
    pub fn starting(mut self, scroll_start: bool) -> Self {
        self.scroll_start = scroll_start;
        self
    }

    #[must_use]
    pub fn ending(mut self, scroll_end: bool) -> Self {
        self.scroll_end = scroll_end;
        self
    }

    /// Appends to the current grid rather than replacing it.
    #[inline]
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.scroll_state == ScrollState::Scrolling && !self.scroll_start
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

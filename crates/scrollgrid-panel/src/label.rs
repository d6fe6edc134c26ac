#![forbid(unsafe_code)]

//! Quick-select rank labels.
//!
//! Ranks shown in the active row follow the look of the labels the input
//! method used for its single-row view. If those labels were `1.`, `2.`, `3.`
//! the ranks become `1.`, `2.`, ... and the neutral label `0.`; anything that
//! does not look like a numbered template falls back to bare digits.

/// Glyphs that mark a label as a key chord rather than a number.
const MODIFIER_GLYPHS: [char; 4] = ['⌃', '⌥', '⇧', '⌘'];
const MODIFIER_PREFIXES: [&str; 4] = ["C-", "A-", "S-", "M-"];

/// Formats a rank digit as a label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelFormatter {
    /// Text around the digit; `None` means bare digits.
    template: Option<(String, String)>,
}

impl LabelFormatter {
    /// Bare digits.
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// Infer the template from the labels of a single-row batch.
    #[must_use]
    pub fn guess<S: AsRef<str>>(labels: &[S]) -> Self {
        let Some(first) = labels.first().map(AsRef::as_ref) else {
            return Self::plain();
        };
        if first.contains(MODIFIER_GLYPHS) || MODIFIER_PREFIXES.iter().any(|p| first.contains(p))
        {
            return Self::plain();
        }
        let Some(at) = first.find('1') else {
            return Self::plain();
        };
        if first.rfind('1') != Some(at) {
            return Self::plain();
        }
        let candidate = Self {
            template: Some((first[..at].to_owned(), first[at + 1..].to_owned())),
        };
        let consistent = labels
            .iter()
            .enumerate()
            .take(10)
            .skip(1)
            .all(|(i, label)| label.as_ref() == candidate.format((i + 1) % 10));
        if consistent { candidate } else { Self::plain() }
    }

    /// Label for `digit`.
    #[must_use]
    pub fn format(&self, digit: usize) -> String {
        match &self.template {
            Some((prefix, suffix)) => format!("{prefix}{digit}{suffix}"),
            None => digit.to_string(),
        }
    }

    /// Label shown on cells outside the active row.
    #[must_use]
    pub fn neutral(&self) -> String {
        self.format(0)
    }
}

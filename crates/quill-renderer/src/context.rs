//! Per-document render context.

use chrono::NaiveDate;

/// Caller-owned data that flows into and out of one render.
///
/// `date` is read when rendering the title heading. `summary` is written by
/// the first paragraph, but only when it is still `None`: a summary set by the
/// caller (e.g. from front matter) is never overwritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Publish date shown next to the level-1 heading.
    pub date: Option<NaiveDate>,
    /// Plain-text content of the first paragraph.
    pub summary: Option<String>,
}

impl RenderContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the publish date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Record `summary` unless one is already present.
    ///
    /// Returns `true` if the summary was stored.
    pub fn offer_summary(&mut self, summary: impl FnOnce() -> String) -> bool {
        if self.summary.is_some() {
            return false;
        }
        self.summary = Some(summary());
        true
    }
}

//! Run metrics.
//!
//! Counts and timings collected by [`Generation`](super::Generation). The
//! eager stages (keywords, variations, combinations) are timed while the
//! run is constructed; the streaming tail only contributes counts and the
//! total elapsed time, which is filled in once the stream is exhausted.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StageMetrics {
    /// Items the stage handed to the next one.
    pub produced: usize,
    /// Elapsed time for the stage.
    pub duration: Duration,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunMetrics {
    pub keywords: StageMetrics,
    pub variations: StageMetrics,
    pub combinations: StageMetrics,
    /// Keywords whose variations were actually computed. Stays well below
    /// `keywords.produced` when the variation cap binds early.
    pub expanded_keywords: usize,
    /// Generated words that passed the length filter.
    pub generated: usize,
    /// Generated words dropped by the length filter.
    pub filtered_by_length: usize,
    /// Words appended from reference lists.
    pub reference: usize,
    /// Total elapsed time, set once the run is exhausted.
    pub total: Duration,
}

impl RunMetrics {
    /// Words the run has yielded so far.
    pub fn emitted(&self) -> usize {
        self.generated + self.reference
    }
}

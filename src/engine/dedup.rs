//! Per-stage deduplication.
//!
//! A `SeenSet` guards one stage's output boundary for one run. Membership is
//! raw string equality: `"Amir"`, `"amir"` and `"@mir"` are three entries.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    seen: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text`; returns `true` if it was not seen before.
    ///
    /// Only allocates when the string is new.
    pub fn insert(&mut self, text: &str) -> bool {
        if self.seen.contains(text) {
            return false;
        }
        self.seen.insert(text.to_owned())
    }

    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(text)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

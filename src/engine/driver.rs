//! Pipeline driver.
//!
//! `Generation` runs the stages in order and is itself the final lazy
//! stream:
//!
//! ```text
//! new():   keywords -> variations (cap) -> combinations (cap)   [eager, bounded]
//! next():  numeric patterns (cap = max_words)
//!            -> length filter -> budget
//!            -> reference words (optional, 1/5 of remaining budget)
//! ```
//!
//! The variation and combination outputs are materialized because pairing
//! needs random access; both are bounded by their caps before collection.

use super::combinations::combinations;
use super::dates::{DateComponents, extract_date_components};
use super::dedup::SeenSet;
use super::keywords::extract_keywords;
use super::metrics::{RunMetrics, StageMetrics};
use super::numeric::NumericPatterns;
use super::variations::VariationGenerator;
use crate::profile::{FieldCategory, Profile, WeightConfig};
use crate::reference::ReferenceSource;
use crate::{Options, WeightedWord};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Share of the remaining budget offered to each reference list.
const REFERENCE_SHARE_DIVISOR: usize = 5;

/// Keywords expanded per parallel batch. The variation cap is checked between
/// batches, so at most one batch is expanded past it.
pub(crate) const PARALLEL_CHUNK: usize = 256;

enum Phase<'a> {
    Generated,
    Reference(Box<dyn Iterator<Item = String> + 'a>),
    Done,
}

/// One wordlist generation run; yields the final words.
pub struct Generation<'a> {
    options: Options,
    patterns: NumericPatterns,
    reference: Option<&'a dyn ReferenceSource>,
    phase: Phase<'a>,
    /// Generated words, tracked only when reference dedup is enabled.
    emitted_words: Option<SeenSet>,
    emitted: usize,
    metrics: RunMetrics,
    started: Instant,
}

impl<'a> Generation<'a> {
    pub fn new(
        profile: &Profile,
        weights: &WeightConfig,
        options: &Options,
        reference: Option<&'a dyn ReferenceSource>,
    ) -> Self {
        let started = Instant::now();
        let limits = options.limits;
        let mut metrics = RunMetrics::default();

        let stage = Instant::now();
        let keywords: Vec<WeightedWord> = extract_keywords(profile, weights, options.categories).collect();
        metrics.keywords = StageMetrics { produced: keywords.len(), duration: stage.elapsed() };
        info!(count = keywords.len(), "extracted keywords");

        let stage = Instant::now();
        let generator = VariationGenerator::new(limits.leet_limit, limits.affix_cap);
        let (variations, expanded) = expand_all(&keywords, &generator, limits.variation_cap, options.threads);
        metrics.variations = StageMetrics { produced: variations.len(), duration: stage.elapsed() };
        metrics.expanded_keywords = expanded;
        info!(count = variations.len(), expanded, threads = options.threads, "generated variations");

        let stage = Instant::now();
        let combined: Vec<WeightedWord> = combinations(&variations, limits.combination_cap).collect();
        metrics.combinations = StageMetrics { produced: combined.len(), duration: stage.elapsed() };
        info!(count = combined.len(), "generated combinations");

        let dates = if options.categories.has(FieldCategory::Dates) {
            extract_date_components(profile)
        } else {
            DateComponents::new()
        };
        debug!(numbers = dates.len(), "date components for numeric patterns");
        let patterns = NumericPatterns::new(combined, &dates, options.max_words, limits.numbers_per_word);

        Self {
            options: options.clone(),
            patterns,
            reference,
            phase: Phase::Generated,
            emitted_words: options.dedup_reference.then(SeenSet::new),
            emitted: 0,
            metrics,
            started,
        }
    }

    /// Counts and timings so far. `total` is set once the run is exhausted.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    fn within_length(&self, word: &str) -> bool {
        let len = word.chars().count();
        self.options.min_length <= len && len <= self.options.max_length
    }

    fn reference_phase(&self) -> Phase<'a> {
        let Some(source) = self.reference else {
            return Phase::Done;
        };
        if !self.options.include_reference || self.emitted >= self.options.max_words {
            return Phase::Done;
        }

        let allotment = (self.options.max_words - self.emitted) / REFERENCE_SHARE_DIVISOR;
        info!(lists = ?self.options.reference_lists, allotment, "adding reference wordlists");
        let lists = self.options.reference_lists.clone();
        Phase::Reference(Box::new(lists.into_iter().flat_map(move |name| source.words(&name, allotment))))
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;
        self.metrics.total = self.started.elapsed();
        info!(
            count = self.emitted,
            generated = self.metrics.generated,
            reference = self.metrics.reference,
            "wordlist complete"
        );
    }
}

impl Iterator for Generation<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if self.emitted >= self.options.max_words && !matches!(self.phase, Phase::Done) {
                self.finish();
            }

            match &mut self.phase {
                Phase::Done => return None,
                Phase::Generated => {
                    let Some(word) = self.patterns.next() else {
                        info!(count = self.metrics.generated, dropped = self.metrics.filtered_by_length, "generated words");
                        self.phase = self.reference_phase();
                        if matches!(self.phase, Phase::Done) {
                            self.finish();
                        }
                        continue;
                    };
                    if !self.within_length(&word.text) {
                        self.metrics.filtered_by_length += 1;
                        continue;
                    }
                    if let Some(seen) = &mut self.emitted_words {
                        seen.insert(&word.text);
                    }
                    self.emitted += 1;
                    self.metrics.generated += 1;
                    return Some(word.text);
                }
                Phase::Reference(words) => {
                    let Some(word) = words.next() else {
                        info!(count = self.metrics.reference, "added reference words");
                        self.finish();
                        continue;
                    };
                    if self.emitted_words.as_ref().is_some_and(|seen| seen.contains(&word)) {
                        continue;
                    }
                    self.emitted += 1;
                    self.metrics.reference += 1;
                    return Some(word);
                }
            }
        }
    }
}

/// Expand every keyword, concatenated in keyword order, capped at `cap`.
///
/// Returns the variations and the number of keywords that were expanded.
/// The parallel path works through ordered batches of [`PARALLEL_CHUNK`]
/// keywords and stops once the cap is reached, so both paths yield identical
/// sequences.
fn expand_all(
    keywords: &[WeightedWord],
    generator: &VariationGenerator,
    cap: usize,
    threads: bool,
) -> (Vec<WeightedWord>, usize) {
    let mut expanded = 0;

    if !threads {
        let variations = keywords
            .iter()
            .inspect(|_| expanded += 1)
            .flat_map(|keyword| generator.expand(&keyword.text, keyword.weight))
            .take(cap)
            .collect();
        return (variations, expanded);
    }

    let mut variations = Vec::new();
    for chunk in keywords.chunks(PARALLEL_CHUNK) {
        let remaining = cap.saturating_sub(variations.len());
        if remaining == 0 {
            break;
        }
        let batch: Vec<Vec<WeightedWord>> = chunk
            .par_iter()
            .map(|keyword| generator.expand(&keyword.text, keyword.weight).take(remaining).collect())
            .collect();
        expanded += chunk.len();
        variations.extend(batch.into_iter().flatten());
    }
    variations.truncate(cap);
    debug!(expanded, kept = variations.len(), "parallel variation expansion");
    (variations, expanded)
}

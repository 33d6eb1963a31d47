//! Profile-driven candidate-password wordlist generation.
//!
//! A [`Profile`] (names, dates, places, ...) is turned into a bounded,
//! deduplicated stream of candidate passwords by a fixed chain of lazy
//! stages: keyword extraction, lexical variation, pairwise combination and
//! numeric-pattern injection. See [`generate`] for the entry point.

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;

pub mod cracker;
pub mod logging;
pub mod profile;
pub mod reference;
pub mod sink;

pub use api::{Options, StageLimits, generate, generate_with};
pub use engine::{
    Affixes, Combinations, DateComponents, Generation, NumericPatterns, RunMetrics, SeenSet, StageMetrics,
    VariationGenerator, affixed_forms, combinations, extract_date_components, extract_keywords, leet_variants,
    numeric_patterns, parse_date,
};
pub use error::{Error, Result};
pub use profile::{CategorySet, FieldCategory, FieldValue, Profile, WeightConfig};

// --- Weighted candidates ----------------------------------------------------

/// Discount applied to the uppercase and capitalized forms of a keyword.
pub const CASE_DISCOUNT: f64 = 0.9;
/// Discount applied to leet-substituted variants.
pub const LEET_DISCOUNT: f64 = 0.8;
/// Discount applied to affixed (prefix/suffix) forms.
pub const AFFIX_DISCOUNT: f64 = 0.7;
/// Discount applied to numeric-pattern candidates.
pub const NUMERIC_DISCOUNT: f64 = 0.9;

/// A candidate string paired with its plausibility weight.
///
/// The weight is only propagated (never used for ordering) so that a
/// downstream consumer can rank or filter the final list.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedWord {
    pub text: String,
    pub weight: f64,
}

impl WeightedWord {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self { text: text.into(), weight }
    }
}

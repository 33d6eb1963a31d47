//! Generation engine.
//!
//! The engine is a chain of lazy, single-pass stages. Each stage owns its cap
//! and (where it deduplicates) its own [`SeenSet`], so nothing is shared
//! between runs.
//!
//! ```text
//! Profile ── extract_keywords ──────────────┐        (keywords.rs, dates.rs)
//!                                           v
//!                          VariationGenerator::expand  (variations.rs)
//!                            └─ affixed_forms          (affixes.rs)
//!                                           │  cap: variation_cap
//!                                           v
//!                                 combinations          (combinations.rs)
//!                                           │  cap: combination_cap
//!                                           v
//!                              numeric_patterns         (numeric.rs)
//!                                           │  cap: max_words
//!                                           v
//!                      Generation: length filter, budget,
//!                      optional reference words         (driver.rs)
//! ```
//!
//! ## Invariants
//!
//! - Every yielded string is non-empty.
//! - No stage yields more items than its cap, including a cap of zero.
//! - Within one stage's output no string repeats (raw string equality).
//! - Output order depends only on the input profile, weights and options.
//!
//! ## Debugging
//!
//! Stage sizes are logged at `info`, per-keyword detail at `debug`. Set
//! `DOSSIER_LOG=dossier=debug` to see it.

#[path = "engine/affixes.rs"]
mod affixes;
#[path = "engine/combinations.rs"]
mod combinations;
#[path = "engine/dates.rs"]
mod dates;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/driver.rs"]
mod driver;
#[path = "engine/keywords.rs"]
mod keywords;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/numeric.rs"]
mod numeric;
#[path = "engine/variations.rs"]
mod variations;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use affixes::{Affixes, affixed_forms};
pub use combinations::{Combinations, SEPARATORS, combinations};
pub use dates::{DATE_LAYOUTS, DateComponents, extract_date_components, parse_date};
pub use dedup::SeenSet;
pub use driver::Generation;
pub use keywords::extract_keywords;
pub use metrics::{RunMetrics, StageMetrics};
pub use numeric::{COMMON_NUMBERS, NumericPatterns, numeric_patterns};
pub use variations::{VariationGenerator, leet_variants};

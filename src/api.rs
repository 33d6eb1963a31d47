use crate::engine::Generation;
use crate::profile::{CategorySet, Profile, WeightConfig};
use crate::reference::ReferenceSource;

/// Internal stage caps.
///
/// These bound the intermediate stages; the user-facing budget is
/// [`Options::max_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageLimits {
    /// Maximum variations kept across all keywords.
    pub variation_cap: usize,
    /// Maximum items produced by the combination stage.
    pub combination_cap: usize,
    /// Per-word budget for leet variants (case forms included).
    pub leet_limit: usize,
    /// Affixed forms generated per word inside the variation stage.
    pub affix_cap: usize,
    /// Numbers used to decorate each word in the numeric stage.
    pub numbers_per_word: usize,
}

impl Default for StageLimits {
    fn default() -> Self {
        Self { variation_cap: 50_000, combination_cap: 30_000, leet_limit: 8, affix_cap: 4, numbers_per_word: 8 }
    }
}

/// Options that shape a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Hard ceiling on the number of words yielded.
    pub max_words: usize,
    /// Shortest word kept, in characters.
    pub min_length: usize,
    /// Longest word kept, in characters.
    pub max_length: usize,
    /// Expand keyword variations on the rayon pool. Output is identical
    /// either way.
    pub threads: bool,
    /// Append words from reference lists after the generated ones.
    pub include_reference: bool,
    /// Reference lists to draw from, in order.
    pub reference_lists: Vec<String>,
    /// Skip reference words that were already generated.
    pub dedup_reference: bool,
    /// Profile categories used for keyword extraction.
    pub categories: CategorySet,
    pub limits: StageLimits,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_words: 100_000,
            min_length: 4,
            max_length: 30,
            threads: true,
            include_reference: false,
            reference_lists: vec!["rockyou".to_string()],
            dedup_reference: false,
            categories: CategorySet::all(),
            limits: StageLimits::default(),
        }
    }
}

/// Generate a wordlist from `profile` without reference lists.
///
/// # Example
/// ```
/// use dossier::{Options, Profile, WeightConfig, generate};
///
/// let profile = Profile::new().with("firstname", "amir").with("birthdate", "1999-08-15");
/// let options = Options { max_words: 50, ..Options::default() };
/// let words: Vec<String> = generate(&profile, &WeightConfig::new(), &options).collect();
///
/// assert!(words.len() <= 50);
/// assert!(words.iter().any(|w| w == "amir1999"));
/// ```
pub fn generate<'a>(profile: &Profile, weights: &WeightConfig, options: &Options) -> Generation<'a> {
    Generation::new(profile, weights, options, None)
}

/// Generate a wordlist, appending reference words from `reference` when
/// [`Options::include_reference`] is set.
pub fn generate_with<'a>(
    profile: &Profile,
    weights: &WeightConfig,
    options: &Options,
    reference: &'a dyn ReferenceSource,
) -> Generation<'a> {
    Generation::new(profile, weights, options, Some(reference))
}

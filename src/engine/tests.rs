use super::*;
use crate::reference::ReferenceSource;
use crate::{CategorySet, Options, Profile, StageLimits, WeightConfig, WeightedWord, generate, generate_with};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;

fn amir() -> Profile {
    Profile::new().with("firstname", "amir").with("birthdate", "1999-08-15")
}

fn run(profile: &Profile, options: &Options) -> Vec<String> {
    generate(profile, &WeightConfig::new(), options).collect()
}

fn budget(max_words: usize) -> Options {
    Options { max_words, ..Options::default() }
}

/// Serves fixed words for every list and records what was asked for.
struct FixedLists {
    words: Vec<&'static str>,
    requests: RefCell<Vec<(String, usize)>>,
}

impl FixedLists {
    fn new(words: &[&'static str]) -> Self {
        Self { words: words.to_vec(), requests: RefCell::new(Vec::new()) }
    }
}

impl ReferenceSource for FixedLists {
    fn words(&self, list: &str, max: usize) -> Box<dyn Iterator<Item = String> + '_> {
        self.requests.borrow_mut().push((list.to_string(), max));
        Box::new(self.words.iter().take(max).map(|w| w.to_string()))
    }
}

#[test]
fn small_budget_keeps_plain_leet_and_numeric_forms() {
    let words = run(&amir(), &budget(50));

    assert!(words.len() <= 50);
    for expected in ["amir", "Amir", "amir123", "@mir", "amir1999"] {
        assert!(words.iter().any(|w| w == expected), "missing {expected} in {words:?}");
    }
    assert_eq!(&words[..4], &["amir", "amir1999", "AMIR", "1999amir"]);
}

#[test]
fn empty_profile_yields_nothing() {
    assert!(run(&Profile::new(), &Options::default()).is_empty());
    let blank = Profile::new().with("firstname", "   ").with("nickname", vec!["", " "]);
    assert!(run(&blank, &Options::default()).is_empty());
}

#[test]
fn output_is_deterministic() {
    let profile = amir().with("lastname", "karimi").with("pet_name", vec!["rex", "luna"]);
    assert_eq!(run(&profile, &Options::default()), run(&profile, &Options::default()));
}

#[test]
fn threaded_and_sequential_runs_agree() {
    let profile = amir().with("lastname", "karimi").with("favorite_team", vec!["chelsea", "esteghlal"]).with("city", "tehran");
    let threaded = run(&profile, &Options { threads: true, ..Options::default() });
    let sequential = run(&profile, &Options { threads: false, ..Options::default() });
    assert_eq!(threaded, sequential);
}

#[test]
fn generated_words_are_unique_and_length_bounded() {
    let profile = amir().with("lastname", "karimi").with("pet_name", vec!["rex"]);
    let options = Options { min_length: 6, max_length: 9, ..Options::default() };
    let words = run(&profile, &options);

    assert!(!words.is_empty());
    let unique: HashSet<&String> = words.iter().collect();
    assert_eq!(unique.len(), words.len());
    assert!(words.iter().all(|w| (6..=9).contains(&w.chars().count())));
}

#[test]
fn length_is_measured_in_characters() {
    let profile = Profile::new().with("city", "köln");
    let options = Options { min_length: 4, max_length: 4, ..Options::default() };
    assert!(run(&profile, &options).iter().any(|w| w == "köln"));
}

#[test]
fn metrics_account_for_every_word() {
    let profile = amir();
    let mut generation = generate(&profile, &WeightConfig::new(), &Options::default());
    let count = generation.by_ref().count();

    let metrics = generation.metrics();
    assert_eq!(metrics.emitted(), count);
    assert_eq!(metrics.reference, 0);
    assert_eq!(metrics.keywords.produced, 5);
    assert!(metrics.variations.produced > 0);
    assert!(metrics.filtered_by_length > 0);
}

#[test]
fn disabled_categories_contribute_no_keywords() {
    let profile = amir();
    let options = Options { categories: CategorySet::parse_list("dates").unwrap(), ..Options::default() };
    let words = run(&profile, &options);
    assert!(words.iter().all(|w| !w.to_lowercase().contains("amir")));
    assert!(words.iter().any(|w| w == "1999"));
}

#[test]
fn disabled_dates_do_not_feed_numeric_patterns() {
    let options = Options { categories: CategorySet::all() - CategorySet::DATES, ..Options::default() };
    let words = run(&amir(), &options);

    assert!(words.iter().any(|w| w == "amir0"));
    assert!(words.iter().all(|w| !w.contains("1999")));
}

#[test]
fn small_variation_cap_stops_expansion_early_on_both_paths() {
    let friends: Vec<String> = (0..20_000).map(|i| format!("friend{i}")).collect();
    let profile = Profile::new().with("friend_names", friends);
    let limits = StageLimits { variation_cap: 10, combination_cap: 10, ..StageLimits::default() };

    let mut outputs = Vec::new();
    for threads in [false, true] {
        let options = Options { max_words: 10, threads, limits, ..Options::default() };
        let mut generation = generate(&profile, &WeightConfig::new(), &options);
        let words: Vec<String> = generation.by_ref().collect();

        let metrics = generation.metrics();
        assert_eq!(metrics.keywords.produced, 20_000);
        assert_eq!(metrics.variations.produced, 10);
        let limit = if threads { super::driver::PARALLEL_CHUNK } else { 1 };
        assert_eq!(metrics.expanded_keywords, limit, "threads={threads}");
        outputs.push(words);
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0].len(), 10);
}

#[test]
fn reference_words_follow_generated_words() {
    let profile = amir();
    let generated = run(&profile, &Options::default());
    let lists = FixedLists::new(&["password", "letmein", "qwerty12"]);

    let options = Options { include_reference: true, ..Options::default() };
    let words: Vec<String> = generate_with(&profile, &WeightConfig::new(), &options, &lists).collect();

    assert_eq!(&words[..generated.len()], &generated[..]);
    assert_eq!(&words[generated.len()..], &["password", "letmein", "qwerty12"]);
    let allotment = (options.max_words - generated.len()) / 5;
    assert_eq!(*lists.requests.borrow(), vec![("rockyou".to_string(), allotment)]);
}

#[test]
fn reference_is_skipped_unless_requested() {
    let lists = FixedLists::new(&["password"]);
    let words: Vec<String> = generate_with(&amir(), &WeightConfig::new(), &Options::default(), &lists).collect();
    assert!(!words.iter().any(|w| w == "password"));
    assert!(lists.requests.borrow().is_empty());
}

#[test]
fn each_reference_list_gets_a_fifth_of_the_remaining_budget() {
    let profile = amir();
    let generated = run(&profile, &Options::default()).len();
    let lists = FixedLists::new(&["alpha111", "bravo222", "charlie3", "delta444"]);

    let options = Options {
        max_words: generated + 10,
        include_reference: true,
        reference_lists: vec!["one".to_string(), "two".to_string()],
        ..Options::default()
    };
    let words: Vec<String> = generate_with(&profile, &WeightConfig::new(), &options, &lists).collect();

    assert_eq!(&words[generated..], &["alpha111", "bravo222", "alpha111", "bravo222"]);
    assert_eq!(*lists.requests.borrow(), vec![("one".to_string(), 2), ("two".to_string(), 2)]);
}

#[test]
fn exhausted_budget_leaves_no_room_for_reference() {
    let lists = FixedLists::new(&["password"]);
    let options = Options { max_words: 10, include_reference: true, ..Options::default() };
    let words: Vec<String> = generate_with(&amir(), &WeightConfig::new(), &options, &lists).collect();

    assert_eq!(words.len(), 10);
    assert!(lists.requests.borrow().is_empty());
}

#[test]
fn reference_dedup_is_opt_in() {
    let profile = amir();
    let lists = FixedLists::new(&["amir", "amir1999", "zzzz9999"]);

    let options = Options { include_reference: true, ..Options::default() };
    let words: Vec<String> = generate_with(&profile, &WeightConfig::new(), &options, &lists).collect();
    assert_eq!(words.iter().filter(|w| *w == "amir").count(), 2);

    let options = Options { include_reference: true, dedup_reference: true, ..Options::default() };
    let words: Vec<String> = generate_with(&profile, &WeightConfig::new(), &options, &lists).collect();
    assert_eq!(words.iter().filter(|w| *w == "amir").count(), 1);
    assert_eq!(words.last().map(String::as_str), Some("zzzz9999"));
}

#[test]
fn stage_weights_compose_through_the_chain() {
    let weights = WeightConfig::new().with("firstname", 2.0).unwrap();
    let profile = Profile::new().with("firstname", "amir");
    let keywords: Vec<WeightedWord> = extract_keywords(&profile, &weights, CategorySet::all()).collect();
    assert_eq!(keywords, vec![WeightedWord::new("amir", 2.0)]);

    let variations: Vec<WeightedWord> = VariationGenerator::default().expand("amir", 2.0).collect();
    let combined: Vec<WeightedWord> = combinations(&variations, 1000).collect();
    let leet = combined.iter().find(|w| w.text == "@mir").unwrap();
    assert_eq!(leet.weight, 2.0 * crate::LEET_DISCOUNT);

    let pair = combined.iter().find(|w| w.text == "amir_amir").unwrap();
    assert_eq!(pair.weight, 2.0);

    let patterns: Vec<WeightedWord> = numeric_patterns(vec![WeightedWord::new("amir", 2.0)], &DateComponents::new(), 10).collect();
    let numeric = patterns.iter().find(|w| w.text == "amir0").unwrap();
    assert_eq!(numeric.weight, 2.0 * crate::NUMERIC_DISCOUNT);
}

fn words_strategy() -> impl Strategy<Value = Vec<WeightedWord>> {
    prop::collection::vec("[a-z0-9]{1,5}", 0..6)
        .prop_map(|texts| texts.into_iter().map(|t| WeightedWord::new(t, 1.0)).collect())
}

proptest! {
    #[test]
    fn affixes_never_exceed_cap(word in "[a-zA-Z]{1,8}", cap in 0usize..30) {
        let forms: Vec<String> = affixed_forms(word, cap).collect();
        prop_assert_eq!(forms.len(), cap.min(17));
    }

    #[test]
    fn combinations_respect_cap_and_uniqueness(words in words_strategy(), cap in 0usize..200) {
        let out: Vec<String> = combinations(&words, cap).map(|w| w.text).collect();
        prop_assert!(out.len() <= cap);
        let unique: HashSet<&String> = out.iter().collect();
        prop_assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn numeric_patterns_respect_cap_and_uniqueness(words in words_strategy(), cap in 0usize..200) {
        let dates: DateComponents = ["1999".to_string(), "99".to_string()].into_iter().collect();
        let out: Vec<String> = numeric_patterns(words, &dates, cap).map(|w| w.text).collect();
        prop_assert!(out.len() <= cap);
        prop_assert!(out.iter().all(|w| !w.is_empty()));
        let unique: HashSet<&String> = out.iter().collect();
        prop_assert_eq!(unique.len(), out.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn generation_never_exceeds_max_words(
        name in "[a-z]{2,8}",
        pet in "[a-z]{2,8}",
        max_words in 0usize..300,
        min_length in 1usize..6,
    ) {
        let profile = Profile::new().with("firstname", name).with("pet_name", vec![pet]).with("birthdate", "2001-02-03");
        let options = Options { max_words, min_length, max_length: 12, ..Options::default() };
        let words = run(&profile, &options);

        prop_assert!(words.len() <= max_words);
        prop_assert!(words.iter().all(|w| (min_length..=12).contains(&w.chars().count())));
        let unique: HashSet<&String> = words.iter().collect();
        prop_assert_eq!(unique.len(), words.len());
    }
}

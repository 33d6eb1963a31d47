//! Lexical variations of a keyword.
//!
//! For one keyword the emission order is fixed:
//!
//! ```text
//! 1. word, lowercase (1.0x)   UPPERCASE, Capitalized (0.9x)
//! 2. for each leet variant v:  v (0.8x), affixed_forms(v) (0.7x)
//! 3. affixed_forms(word) (0.7x)
//! ```
//!
//! The leet variant set is bounded by a per-word limit that counts every
//! candidate produced (duplicates included), including the four case forms.

use super::affixes::affixed_forms;
use crate::{AFFIX_DISCOUNT, CASE_DISCOUNT, LEET_DISCOUNT, WeightedWord};

/// Single-character substitutions applied to every occurrence in the word.
const SIMPLE_LEET: [(char, &str); 6] = [('a', "@"), ('e', "3"), ('i', "1"), ('o', "0"), ('s', "$"), ('t', "7")];

/// Positional substitutions, keyed by lowercase ASCII letter.
const LEET_TABLE: [(char, &[&str]); 26] = [
    ('a', &["@", "4", "^", "/\\", "λ"]),
    ('b', &["8", "6", "|3", "ß"]),
    ('c', &["(", "<", "{", "[", "©"]),
    ('d', &["|)", "|]", "Ð"]),
    ('e', &["3", "&", "€", "£"]),
    ('f', &["|=", "ƒ", "ph"]),
    ('g', &["6", "9", "&"]),
    ('h', &["#", "|-|", "}{"]),
    ('i', &["1", "!", "|", "]["]),
    ('j', &["_|", "_/", "]"]),
    ('k', &["X", "|<", "|{"]),
    ('l', &["1", "|", "7", "|_"]),
    ('m', &["|\\/|", "/\\/\\", "[V]"]),
    ('n', &["|\\|", "/\\/", "[\\]"]),
    ('o', &["0", "()", "[]", "°"]),
    ('p', &["|*", "|o", "|>"]),
    ('q', &["(_,)", "()_", "0_"]),
    ('r', &["|2", "|?", "|^"]),
    ('s', &["5", "$", "§", "z"]),
    ('t', &["7", "+", "†"]),
    ('u', &["|_|", "(_)", "\\_\\"]),
    ('v', &["\\/", "|/", "\\|"]),
    ('w', &["\\/\\/", "VV", "\\N"]),
    ('x', &["><", "}{", ")("]),
    ('y', &["`/", "¥", "\\|/"]),
    ('z', &["2", "%", "s"]),
];

/// Positional substitution only applies to words up to this many chars.
const SHORT_WORD_CHARS: usize = 6;
/// Positional substitution touches only the leading characters.
const SUBSTITUTED_POSITIONS: usize = 2;
/// Alternatives taken per letter from `LEET_TABLE`.
const ALTERNATIVES_PER_LETTER: usize = 2;

const CASE_WEIGHTS: [f64; 4] = [1.0, 1.0, CASE_DISCOUNT, CASE_DISCOUNT];

/// Expands keywords into weighted variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariationGenerator {
    /// Per-word budget for the leet variant set (case forms included).
    pub leet_limit: usize,
    /// Cap passed to `affixed_forms` for every affixed word.
    pub affix_cap: usize,
}

impl Default for VariationGenerator {
    fn default() -> Self {
        Self { leet_limit: 8, affix_cap: 4 }
    }
}

impl VariationGenerator {
    pub fn new(leet_limit: usize, affix_cap: usize) -> Self {
        Self { leet_limit, affix_cap }
    }

    /// Lazily expand one keyword into its weighted variants.
    pub fn expand(&self, word: &str, weight: f64) -> impl Iterator<Item = WeightedWord> + use<> {
        let affix_cap = self.affix_cap;

        let cases = case_forms(word)
            .into_iter()
            .zip(CASE_WEIGHTS)
            .map(move |(text, factor)| WeightedWord::new(text, weight * factor));

        let leet = leet_variants(word, self.leet_limit).into_iter().flat_map(move |variant| {
            let affixed = affixed_forms(variant.clone(), affix_cap)
                .map(move |text| WeightedWord::new(text, weight * AFFIX_DISCOUNT));
            std::iter::once(WeightedWord::new(variant, weight * LEET_DISCOUNT)).chain(affixed)
        });

        let original =
            affixed_forms(word, affix_cap).map(move |text| WeightedWord::new(text, weight * AFFIX_DISCOUNT));

        cases.chain(leet).chain(original).filter(|w| !w.text.is_empty())
    }
}

/// The deduplicated leet variant set of `word`, in first-seen order.
///
/// Candidates are produced in three rounds (case forms, simple
/// substitutions, positional substitutions for short words) and every
/// produced candidate counts against `limit`, even if it repeats.
pub fn leet_variants(word: &str, limit: usize) -> Vec<String> {
    if word.is_empty() {
        return Vec::new();
    }

    let mut pool = VariantPool::new(limit);
    for form in case_forms(word) {
        pool.offer(form);
    }

    let lower = word.to_lowercase();
    for (letter, replacement) in SIMPLE_LEET {
        if pool.is_full() {
            break;
        }
        if !lower.contains(letter) {
            continue;
        }
        let substituted = lower.replace(letter, replacement);
        let capitalized = capitalize(&substituted);
        pool.offer(substituted);
        pool.offer(capitalized);
    }

    if word.chars().count() <= SHORT_WORD_CHARS {
        for (index, ch) in word.char_indices().take(SUBSTITUTED_POSITIONS) {
            for alternative in alternatives(ch).iter().take(ALTERNATIVES_PER_LETTER) {
                if pool.is_full() {
                    return pool.into_items();
                }
                pool.offer(format!("{}{}{}", &word[..index], alternative, &word[index + ch.len_utf8()..]));
            }
        }
    }

    pool.into_items()
}

fn alternatives(ch: char) -> &'static [&'static str] {
    let lower = ch.to_ascii_lowercase();
    LEET_TABLE.iter().find(|(letter, _)| *letter == lower).map(|(_, alts)| *alts).unwrap_or(&[])
}

/// `[word, lowercase, UPPERCASE, Capitalized]`
fn case_forms(word: &str) -> [String; 4] {
    [word.to_string(), word.to_lowercase(), word.to_uppercase(), capitalize(word)]
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Bounded, order-preserving candidate collector.
struct VariantPool {
    items: Vec<String>,
    produced: usize,
    limit: usize,
}

impl VariantPool {
    fn new(limit: usize) -> Self {
        Self { items: Vec::new(), produced: 0, limit }
    }

    fn is_full(&self) -> bool {
        self.produced >= self.limit
    }

    fn offer(&mut self, candidate: String) {
        if self.is_full() {
            return;
        }
        self.produced += 1;
        if !self.items.contains(&candidate) {
            self.items.push(candidate);
        }
    }

    fn into_items(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("aMIR"), "Amir");
        assert_eq!(capitalize("@mir"), "@mir");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn leet_set_stops_exactly_at_the_limit() {
        // 4 case forms + a->@ pair + i->1 pair = 8 produced
        assert_eq!(leet_variants("amir", 8), vec!["amir", "AMIR", "Amir", "@mir", "am1r", "Am1r"]);
    }

    #[test]
    fn simple_substitution_replaces_every_occurrence() {
        // "@nn@" capitalizes to itself, so the pair collapses to one entry
        assert_eq!(leet_variants("anna", 6), vec!["anna", "ANNA", "Anna", "@nn@"]);
    }

    #[test]
    fn short_words_get_positional_substitutions() {
        assert_eq!(
            leet_variants("max", 8),
            vec!["max", "MAX", "Max", "m@x", "M@x", "|\\/|ax", "/\\/\\ax"]
        );
        assert_eq!(
            leet_variants("max", 20),
            vec!["max", "MAX", "Max", "m@x", "M@x", "|\\/|ax", "/\\/\\ax", "m4x"]
        );
    }

    #[test]
    fn long_words_skip_positional_substitutions() {
        assert_eq!(
            leet_variants("bobbyjoe", 20),
            vec!["bobbyjoe", "BOBBYJOE", "Bobbyjoe", "bobbyjo3", "Bobbyjo3", "b0bbyj0e", "B0bbyj0e"]
        );
    }

    #[test]
    fn digits_have_no_leet_forms() {
        assert_eq!(leet_variants("1999", 8), vec!["1999"]);
    }

    #[test]
    fn expand_orders_and_discounts_variants() {
        let generator = VariationGenerator::default();
        let words: Vec<WeightedWord> = generator.expand("amir", 1.0).collect();

        let head: Vec<(&str, f64)> = words.iter().take(9).map(|w| (w.text.as_str(), w.weight)).collect();
        assert_eq!(
            head,
            vec![
                ("amir", 1.0),
                ("amir", 1.0),
                ("AMIR", 0.9),
                ("Amir", 0.9),
                ("amir", 0.8),
                ("amir", 0.7),
                ("amir123", 0.7),
                ("amir1234", 0.7),
                ("amir1", 0.7),
            ]
        );

        // 4 case forms + 6 leet variants x (1 + 4 affixes) + 4 original affixes
        assert_eq!(words.len(), 38);
        assert!(words.iter().any(|w| w.text == "@mir" && w.weight == 1.0 * LEET_DISCOUNT));
        assert_eq!(words.last().map(|w| w.text.as_str()), Some("amir1"));
    }

    #[test]
    fn leet_weight_is_exactly_discounted() {
        let weight = 1.3;
        let generator = VariationGenerator::default();
        let leet = generator.expand("sara", weight).find(|w| w.text == "s@r@").unwrap();
        assert_eq!(leet.weight, weight * LEET_DISCOUNT);
    }

    #[test]
    fn empty_word_expands_to_nothing() {
        assert_eq!(VariationGenerator::default().expand("", 1.0).count(), 0);
    }
}

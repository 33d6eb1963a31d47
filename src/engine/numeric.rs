//! Numeric-pattern injection.
//!
//! Every input word passes through once, and every word is decorated with
//! the first few numbers of
//!
//! ```text
//! date components (insertion order) ++ 0..=19 ++ 123 1234 12345 111 222 333
//! ```
//!
//! as `word+n`, `n+word`, `word_n`, `n_word`.
//!
//! The two streams (pass-through words and patterns) are merged by taking
//! turns, starting with a word. When the cap is far away the result is the
//! same set of strings as emitting all words and then all patterns; when the
//! cap binds, the output keeps a mix of plain words and numeric forms instead
//! of spending the whole budget on the first word's patterns. Deduplication
//! is global across both streams.

use super::dates::DateComponents;
use super::dedup::SeenSet;
use crate::{NUMERIC_DISCOUNT, WeightedWord};

pub const COMMON_NUMBERS: [&str; 26] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17", "18", "19",
    "123", "1234", "12345", "111", "222", "333",
];

/// Numbers used per word when no explicit count is given.
pub const DEFAULT_NUMBERS_PER_WORD: usize = 8;

/// Patterns generated for each `(word, number)`.
const PATTERNS_PER_NUMBER: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Word,
    Pattern,
}

/// Lazy numeric-pattern stream.
#[derive(Debug, Clone)]
pub struct NumericPatterns {
    words: Vec<WeightedWord>,
    numbers: Vec<String>,
    cap: usize,
    emitted: usize,
    seen: SeenSet,
    turn: Turn,
    /// Next input word for the pass-through stream.
    next_word: usize,
    /// Word currently being decorated by the pattern stream.
    pattern_word: usize,
    /// Position within `numbers x PATTERNS_PER_NUMBER` for `pattern_word`.
    pattern_step: usize,
}

/// Numeric patterns over `words` using the default number count.
pub fn numeric_patterns(
    words: impl IntoIterator<Item = WeightedWord>,
    dates: &DateComponents,
    cap: usize,
) -> NumericPatterns {
    NumericPatterns::new(words, dates, cap, DEFAULT_NUMBERS_PER_WORD)
}

impl NumericPatterns {
    pub fn new(
        words: impl IntoIterator<Item = WeightedWord>,
        dates: &DateComponents,
        cap: usize,
        numbers_per_word: usize,
    ) -> Self {
        let numbers = dates
            .iter()
            .map(str::to_string)
            .chain(COMMON_NUMBERS.iter().map(|n| n.to_string()))
            .take(numbers_per_word)
            .collect();

        Self {
            words: words.into_iter().collect(),
            numbers,
            cap,
            emitted: 0,
            seen: SeenSet::new(),
            turn: Turn::Word,
            next_word: 0,
            pattern_word: 0,
            pattern_step: 0,
        }
    }

    /// The numbers each word is decorated with, in order.
    pub fn numbers(&self) -> &[String] {
        &self.numbers
    }

    fn next_plain(&mut self) -> Option<WeightedWord> {
        while let Some(word) = self.words.get(self.next_word) {
            self.next_word += 1;
            if self.seen.insert(&word.text) {
                return Some(word.clone());
            }
        }
        None
    }

    fn next_pattern(&mut self) -> Option<WeightedWord> {
        let steps = self.numbers.len() * PATTERNS_PER_NUMBER;
        while let Some(word) = self.words.get(self.pattern_word) {
            if self.pattern_step >= steps {
                self.pattern_word += 1;
                self.pattern_step = 0;
                continue;
            }

            let number = &self.numbers[self.pattern_step / PATTERNS_PER_NUMBER];
            let text = match self.pattern_step % PATTERNS_PER_NUMBER {
                0 => format!("{}{}", word.text, number),
                1 => format!("{}{}", number, word.text),
                2 => format!("{}_{}", word.text, number),
                _ => format!("{}_{}", number, word.text),
            };
            self.pattern_step += 1;

            if self.seen.insert(&text) {
                return Some(WeightedWord::new(text, word.weight * NUMERIC_DISCOUNT));
            }
        }
        None
    }
}

impl Iterator for NumericPatterns {
    type Item = WeightedWord;

    fn next(&mut self) -> Option<WeightedWord> {
        if self.emitted >= self.cap {
            return None;
        }

        let item = match self.turn {
            Turn::Word => self.next_plain().or_else(|| self.next_pattern()),
            Turn::Pattern => self.next_pattern().or_else(|| self.next_plain()),
        }?;

        self.turn = match self.turn {
            Turn::Word => Turn::Pattern,
            Turn::Pattern => Turn::Word,
        };
        self.emitted += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cap.saturating_sub(self.emitted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(items: &[&str]) -> DateComponents {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn date_numbers_come_before_common_numbers() {
        let stream = numeric_patterns(Vec::new(), &dates(&["1999", "99", "08", "15"]), 10);
        assert_eq!(stream.numbers(), &["1999", "99", "08", "15", "0", "1", "2", "3"]);

        let stream = numeric_patterns(Vec::new(), &DateComponents::new(), 10);
        assert_eq!(stream.numbers(), &["0", "1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn single_word_gets_four_patterns_per_number() {
        let words = vec![WeightedWord::new("max", 1.0)];
        let out: Vec<String> = NumericPatterns::new(words, &dates(&["1999"]), 100, 2).map(|w| w.text).collect();
        assert_eq!(out, vec!["max", "max1999", "1999max", "max_1999", "1999_max", "max0", "0max", "max_0", "0_max"]);
    }

    #[test]
    fn streams_alternate_starting_with_a_word() {
        let words = vec![WeightedWord::new("a", 1.0), WeightedWord::new("b", 1.0), WeightedWord::new("c", 1.0)];
        let out: Vec<String> = NumericPatterns::new(words, &DateComponents::new(), 6, 1).map(|w| w.text).collect();
        assert_eq!(out, vec!["a", "a0", "b", "0a", "c", "a_0"]);
    }

    #[test]
    fn pattern_weight_is_discounted_and_words_keep_theirs() {
        let words = vec![WeightedWord::new("max", 0.5)];
        let out: Vec<WeightedWord> = numeric_patterns(words, &DateComponents::new(), 100).collect();
        assert_eq!(out[0].weight, 0.5);
        assert!(out[1..].iter().all(|w| w.weight == 0.5 * NUMERIC_DISCOUNT));
        assert_eq!(out.len(), 1 + DEFAULT_NUMBERS_PER_WORD * PATTERNS_PER_NUMBER);
    }

    #[test]
    fn dedup_spans_words_and_patterns() {
        // "max1" is both an input word and the pattern max + "1"
        let words = vec![WeightedWord::new("max", 1.0), WeightedWord::new("max1", 1.0), WeightedWord::new("max", 1.0)];
        let out: Vec<String> = numeric_patterns(words, &DateComponents::new(), 1000).map(|w| w.text).collect();

        let mut unique = out.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), out.len());
        assert_eq!(out.iter().filter(|t| *t == "max1").count(), 1);
    }

    #[test]
    fn cap_is_honored_at_every_yield() {
        let words = vec![WeightedWord::new("max", 1.0)];
        for cap in 0..40 {
            assert_eq!(numeric_patterns(words.clone(), &DateComponents::new(), cap).count(), cap.min(33));
        }
    }
}

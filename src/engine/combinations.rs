//! Two-token combinations.
//!
//! Output is every distinct input word in input order, followed by joined
//! pairs:
//!
//! ```text
//! for i < j (lexicographic):
//!     for sep in ["", "_", ".", "-"]:
//!         w[i] sep w[j]
//!         w[j] sep w[i]
//! ```
//!
//! Without a cap this is quadratic in the input, so the cap is checked before
//! every single yield and iteration may stop in the middle of a pair.

use super::dedup::SeenSet;
use crate::WeightedWord;

pub const SEPARATORS: [&str; 4] = ["", "_", ".", "-"];

/// Candidates per `(i, j)` pair: both orders for every separator.
const STEPS_PER_PAIR: usize = SEPARATORS.len() * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Passing individual words through; index of the next word.
    Single(usize),
    /// Joining pairs; `step` encodes separator (`step / 2`) and order (`step % 2`).
    Pair { i: usize, j: usize, step: usize },
    Done,
}

/// Lazy combination stream over a borrowed word list.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    words: &'a [WeightedWord],
    cap: usize,
    emitted: usize,
    seen: SeenSet,
    cursor: Cursor,
}

/// Individual words, then pairwise joins of `words`, at most `cap` items.
pub fn combinations(words: &[WeightedWord], cap: usize) -> Combinations<'_> {
    Combinations { words, cap, emitted: 0, seen: SeenSet::new(), cursor: Cursor::Single(0) }
}

impl Combinations<'_> {
    /// Number of items yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn emit(&mut self, word: WeightedWord) -> Option<WeightedWord> {
        self.emitted += 1;
        Some(word)
    }

    fn advance_pair(&mut self, i: usize, j: usize, step: usize) {
        self.cursor = if step + 1 < STEPS_PER_PAIR {
            Cursor::Pair { i, j, step: step + 1 }
        } else if j + 1 < self.words.len() {
            Cursor::Pair { i, j: j + 1, step: 0 }
        } else {
            Cursor::Pair { i: i + 1, j: i + 2, step: 0 }
        };
    }
}

impl Iterator for Combinations<'_> {
    type Item = WeightedWord;

    fn next(&mut self) -> Option<WeightedWord> {
        loop {
            if self.emitted >= self.cap {
                self.cursor = Cursor::Done;
            }

            match self.cursor {
                Cursor::Done => return None,
                Cursor::Single(index) => {
                    let Some(word) = self.words.get(index) else {
                        self.cursor = Cursor::Pair { i: 0, j: 1, step: 0 };
                        continue;
                    };
                    self.cursor = Cursor::Single(index + 1);
                    if self.seen.insert(&word.text) {
                        let word = word.clone();
                        return self.emit(word);
                    }
                }
                Cursor::Pair { i, j, step } => {
                    if j >= self.words.len() {
                        self.cursor = Cursor::Done;
                        continue;
                    }
                    self.advance_pair(i, j, step);

                    let (left, right) = (&self.words[i], &self.words[j]);
                    let (first, second) = if step % 2 == 0 { (left, right) } else { (right, left) };
                    let text = format!("{}{}{}", first.text, SEPARATORS[step / 2], second.text);
                    if self.seen.insert(&text) {
                        let weight = (left.weight + right.weight) / 2.0;
                        return self.emit(WeightedWord::new(text, weight));
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cap.saturating_sub(self.emitted)))
    }
}

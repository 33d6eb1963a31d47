//! Prefix/suffix decoration.
//!
//! Forms are produced in a fixed priority order and the iterator stops the
//! moment its cap is reached, so under a tight cap the bare word and the
//! early suffixes always survive while the later combinators are dropped.

/// One decoration applied to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Affix {
    Bare,
    Suffix(&'static str),
    Prefix(&'static str),
}

impl Affix {
    fn apply(self, word: &str) -> String {
        match self {
            Affix::Bare => word.to_string(),
            Affix::Suffix(suffix) => format!("{word}{suffix}"),
            Affix::Prefix(prefix) => format!("{prefix}{word}"),
        }
    }
}

/// Priority order: bare word, suffixes, prefixes, special combinators.
const AFFIXES: [Affix; 17] = [
    Affix::Bare,
    Affix::Suffix("123"),
    Affix::Suffix("1234"),
    Affix::Suffix("1"),
    Affix::Suffix("2"),
    Affix::Suffix("!"),
    Affix::Suffix(""),
    Affix::Prefix(""),
    Affix::Prefix("!"),
    Affix::Prefix("1"),
    Affix::Prefix("2"),
    Affix::Suffix("_123"),
    Affix::Suffix("_2024"),
    Affix::Suffix("_99"),
    Affix::Prefix("1"),
    Affix::Prefix("2"),
    Affix::Prefix("99"),
];

/// Lazy iterator over the decorated forms of one word.
#[derive(Debug, Clone)]
pub struct Affixes {
    word: String,
    cap: usize,
    position: usize,
}

/// Decorated forms of `word`, at most `cap` of them.
///
/// Forms are not deduplicated here (`word + ""` equals `word`); the
/// combination stage downstream owns deduplication.
pub fn affixed_forms(word: impl Into<String>, cap: usize) -> Affixes {
    Affixes { word: word.into(), cap, position: 0 }
}

impl Iterator for Affixes {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.position >= self.cap {
            return None;
        }
        let affix = AFFIXES.get(self.position)?;
        self.position += 1;
        Some(affix.apply(&self.word))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cap.min(AFFIXES.len()).saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Affixes {}

//! Date decomposition.
//!
//! A date-like string becomes a small set of numeric tokens that people
//! commonly reuse in passwords: full year, two-digit year, month and day.
//! Strings that match none of the known layouts fall back to their maximal
//! digit runs, so `"born in 1999!"` still contributes `"1999"`.

use crate::profile::{FieldCategory, Profile};
use chrono::{Datelike, NaiveDate};

/// Known layouts, tried in order; the first match wins.
///
/// Order matters for ambiguous input: `01/02/2020` is read day-first.
pub const DATE_LAYOUTS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Insertion-ordered string set.
///
/// Semantics are membership-only; the order is kept so that two runs over
/// the same profile iterate identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateComponents {
    items: Vec<String>,
}

impl DateComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: String) -> bool {
        if self.contains(&component) {
            return false;
        }
        self.items.push(component);
        true
    }

    pub fn contains(&self, component: &str) -> bool {
        self.items.iter().any(|c| c == component)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<String> for DateComponents {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for component in iter {
            self.insert(component);
        }
    }
}

impl FromIterator<String> for DateComponents {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut components = DateComponents::new();
        components.extend(iter);
        components
    }
}

impl IntoIterator for DateComponents {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Decompose one date-like string. Never fails; may return an empty set.
pub fn parse_date(raw: &str) -> DateComponents {
    let raw = raw.trim();

    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, layout) {
            let year = date.year();
            return [
                year.to_string(),
                format!("{:02}", year.rem_euclid(100)),
                format!("{:02}", date.month()),
                format!("{:02}", date.day()),
            ]
            .into_iter()
            .collect();
        }
    }

    regex!(r"[0-9]+").find_iter(raw).map(|m| m.as_str().to_string()).collect()
}

/// Merge the components of every date field in the profile.
pub fn extract_date_components(profile: &Profile) -> DateComponents {
    let mut components = DateComponents::new();
    for field in FieldCategory::Dates.fields() {
        let Some(value) = profile.get(field) else { continue };
        for item in value.items() {
            components.extend(parse_date(item));
        }
    }
    components
}

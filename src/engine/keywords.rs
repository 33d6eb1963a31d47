//! Keyword extraction.
//!
//! Reads the recognized profile fields in category order, then appends the
//! date components found in the date fields. Purely functional: the same
//! profile and weights always produce the same sequence.

use super::dates::extract_date_components;
use crate::WeightedWord;
use crate::profile::{CategorySet, FieldCategory, Profile, WeightConfig};

/// Lazily extract weighted keywords from `profile`.
///
/// Items are trimmed and blank items dropped. Categories missing from
/// `categories` contribute nothing.
pub fn extract_keywords<'a>(
    profile: &'a Profile,
    weights: &'a WeightConfig,
    categories: CategorySet,
) -> impl Iterator<Item = WeightedWord> + 'a {
    let fields = FieldCategory::TEXTUAL
        .into_iter()
        .filter(move |category| categories.has(*category))
        .flat_map(|category| category.fields().iter().map(move |field| (category, *field)))
        .filter_map(move |(category, field)| {
            profile.get(field).map(|value| (value.items(), weights.resolve(field, category)))
        })
        .flat_map(|(items, weight)| {
            items.iter().map(|item| item.trim()).filter(|item| !item.is_empty()).map(move |item| WeightedWord::new(item, weight))
        });

    // Date parsing is deferred until the field keywords are drained.
    let dates = std::iter::once(())
        .filter(move |_| categories.has(FieldCategory::Dates))
        .flat_map(move |_| {
            let weight = weights.category(FieldCategory::Dates);
            extract_date_components(profile).into_iter().map(move |component| WeightedWord::new(component, weight))
        });

    fields.chain(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(profile: &Profile, weights: &WeightConfig, categories: CategorySet) -> Vec<(String, f64)> {
        extract_keywords(profile, weights, categories).map(|w| (w.text, w.weight)).collect()
    }

    #[test]
    fn fields_follow_category_then_field_order() {
        let profile = Profile::new()
            .with("city", "tehran")
            .with("pet_name", "max")
            .with("lastname", "hosseini")
            .with("firstname", "amir");

        let texts: Vec<String> = pairs(&profile, &WeightConfig::new(), CategorySet::all()).into_iter().map(|p| p.0).collect();
        assert_eq!(texts, vec!["amir", "hosseini", "max", "tehran"]);
    }

    #[test]
    fn weights_resolve_per_field_and_category() {
        let profile = Profile::new().with("firstname", "amir").with("lastname", "hosseini").with("city", "tehran");
        let weights = WeightConfig::new().with("firstname", 1.2).unwrap().with("basic", 0.5).unwrap();

        assert_eq!(
            pairs(&profile, &weights, CategorySet::all()),
            vec![("amir".to_string(), 1.2), ("hosseini".to_string(), 0.5), ("tehran".to_string(), 1.0)]
        );
    }

    #[test]
    fn lists_are_flattened_and_blank_items_dropped() {
        let profile = Profile::new().with("friend_names", vec!["  reza ", "", "   ", "sara"]).with("nickname", "   ");
        let texts: Vec<String> = pairs(&profile, &WeightConfig::new(), CategorySet::all()).into_iter().map(|p| p.0).collect();
        assert_eq!(texts, vec!["reza", "sara"]);
    }

    #[test]
    fn date_components_follow_fields_with_the_dates_weight() {
        let profile = Profile::new().with("birthdate", "1999-08-15").with("firstname", "amir");
        let weights = WeightConfig::new().with("dates", 0.9).unwrap();

        assert_eq!(
            pairs(&profile, &weights, CategorySet::all()),
            vec![
                ("amir".to_string(), 1.0),
                ("1999".to_string(), 0.9),
                ("99".to_string(), 0.9),
                ("08".to_string(), 0.9),
                ("15".to_string(), 0.9),
            ]
        );
    }

    #[test]
    fn disabled_categories_are_skipped() {
        let profile = Profile::new().with("firstname", "amir").with("city", "tehran").with("birthdate", "1999-08-15");
        let texts: Vec<String> =
            pairs(&profile, &WeightConfig::new(), CategorySet::LOCATION).into_iter().map(|p| p.0).collect();
        assert_eq!(texts, vec!["tehran"]);
    }

    #[test]
    fn unknown_fields_and_empty_profiles_yield_nothing() {
        let profile = Profile::new().with("hobbies", vec!["gaming"]);
        assert!(pairs(&profile, &WeightConfig::new(), CategorySet::all()).is_empty());
        assert!(pairs(&Profile::new(), &WeightConfig::new(), CategorySet::all()).is_empty());
    }
}

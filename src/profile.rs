//! Profile records, field categories and weight configuration.
//!
//! A profile is a flat mapping from field name to a scalar or a list of
//! scalars. Only the fields listed in the [`FieldCategory`] table are ever
//! read; anything else in the record is carried along and ignored.
//!
//! Weights resolve with a fixed precedence:
//!
//! ```text
//! override[field]  ->  override[category]  ->  1.0
//! ```

use crate::error::{Error, Result};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::path::Path;

/// Weight used when neither the field nor its category is overridden.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Key of the weight-override block inside a JSON profile.
pub const WEIGHTS_KEY: &str = "weights";

// --- Categories ---------------------------------------------------------------

/// Fixed grouping of recognized profile fields.
///
/// The declaration order is the extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    Basic,
    Family,
    Relationships,
    Location,
    Education,
    Work,
    Numbers,
    Favorites,
    Dates,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 9] = [
        FieldCategory::Basic,
        FieldCategory::Family,
        FieldCategory::Relationships,
        FieldCategory::Location,
        FieldCategory::Education,
        FieldCategory::Work,
        FieldCategory::Numbers,
        FieldCategory::Favorites,
        FieldCategory::Dates,
    ];

    /// Categories whose fields are emitted verbatim as keywords.
    ///
    /// `Dates` is excluded: its fields are decomposed into date components.
    pub const TEXTUAL: [FieldCategory; 8] = [
        FieldCategory::Basic,
        FieldCategory::Family,
        FieldCategory::Relationships,
        FieldCategory::Location,
        FieldCategory::Education,
        FieldCategory::Work,
        FieldCategory::Numbers,
        FieldCategory::Favorites,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldCategory::Basic => "basic",
            FieldCategory::Family => "family",
            FieldCategory::Relationships => "relationships",
            FieldCategory::Location => "location",
            FieldCategory::Education => "education",
            FieldCategory::Work => "work",
            FieldCategory::Numbers => "numbers",
            FieldCategory::Favorites => "favorites",
            FieldCategory::Dates => "dates",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Recognized field names, in extraction order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FieldCategory::Basic => &["firstname", "lastname", "middlename", "nickname", "username"],
            FieldCategory::Family => &[
                "mother_maiden_name",
                "father_name",
                "family_name",
                "spouse_name",
                "child_name",
                "children_names",
                "pet_name",
            ],
            FieldCategory::Relationships => &[
                "girlfriend_names",
                "boyfriend_names",
                "friend_names",
                "partner_names",
                "ex_girlfriend_names",
                "ex_boyfriend_names",
            ],
            FieldCategory::Location => &[
                "city",
                "birth_city",
                "country",
                "birth_country",
                "state",
                "birth_state",
                "hometown",
                "street",
                "zipcode",
                "postal_code",
            ],
            FieldCategory::Education => &["school", "university", "college", "high_school", "elementary_school"],
            FieldCategory::Work => &["workplace", "company", "employer", "department", "team", "project_name"],
            FieldCategory::Numbers => &[
                "id_card",
                "passport_number",
                "driver_license_number",
                "phone_number",
                "student_id",
                "employee_id",
                "social_security",
                "insurance_number",
            ],
            FieldCategory::Favorites => &[
                "favorite_color",
                "favorite_movie",
                "favorite_book",
                "favorite_team",
                "favorite_player",
                "favorite_food",
                "favorite_restaurant",
            ],
            FieldCategory::Dates => &[
                "birthdate",
                "anniversary",
                "important_date",
                "child_birthdate",
                "children_birthdates",
                "spouse_birthdate",
                "marriage_date",
                "graduation_date",
                "employment_date",
            ],
        }
    }

    pub fn flag(self) -> CategorySet {
        match self {
            FieldCategory::Basic => CategorySet::BASIC,
            FieldCategory::Family => CategorySet::FAMILY,
            FieldCategory::Relationships => CategorySet::RELATIONSHIPS,
            FieldCategory::Location => CategorySet::LOCATION,
            FieldCategory::Education => CategorySet::EDUCATION,
            FieldCategory::Work => CategorySet::WORK,
            FieldCategory::Numbers => CategorySet::NUMBERS,
            FieldCategory::Favorites => CategorySet::FAVORITES,
            FieldCategory::Dates => CategorySet::DATES,
        }
    }
}

bitflags::bitflags! {
    /// Categories enabled for keyword extraction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategorySet: u16 {
        const BASIC         = 1 << 0;
        const FAMILY        = 1 << 1;
        const RELATIONSHIPS = 1 << 2;
        const LOCATION      = 1 << 3;
        const EDUCATION     = 1 << 4;
        const WORK          = 1 << 5;
        const NUMBERS       = 1 << 6;
        const FAVORITES     = 1 << 7;
        const DATES         = 1 << 8;
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::all()
    }
}

impl CategorySet {
    pub fn has(self, category: FieldCategory) -> bool {
        self.contains(category.flag())
    }

    /// Parse a comma-separated list of category names (`"basic,dates"`).
    pub fn parse_list(list: &str) -> std::result::Result<Self, String> {
        let mut set = CategorySet::empty();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let category = FieldCategory::from_name(name).ok_or_else(|| format!("unknown category '{name}'"))?;
            set |= category.flag();
        }
        Ok(set)
    }
}

// --- Field values -------------------------------------------------------------

/// A profile field: one scalar or a list of scalars, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The value normalized to a list of one-or-more items.
    pub fn items(&self) -> &[String] {
        match self {
            FieldValue::Scalar(s) => std::slice::from_ref(s),
            FieldValue::List(items) => items,
        }
    }

    /// Convert a JSON value. Objects and falsy values (`null`, `false`, `0`,
    /// `""`, `[]`) are absent, and falsy list items are dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => {
                let items: Vec<String> = items.iter().filter_map(scalar_text).collect();
                (!items.is_empty()).then_some(FieldValue::List(items))
            }
            other => scalar_text(other).map(FieldValue::Scalar),
        }
    }
}

/// Text of a truthy scalar. `true` renders as `"true"`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

// --- Profile ------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    fields: HashMap<String, FieldValue>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and embedding.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a profile from a JSON object, skipping absent/null values.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != WEIGHTS_KEY)
            .filter_map(|(key, value)| FieldValue::from_json(value).map(|v| (key.clone(), v)))
            .collect();
        Profile { fields }
    }
}

// --- Weights ------------------------------------------------------------------

/// Per-field and per-category weight overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightConfig {
    overrides: HashMap<String, f64>,
}

impl WeightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override keyed by a field name or a category name.
    ///
    /// Non-positive or non-finite weights are rejected.
    pub fn with(mut self, name: impl Into<String>, weight: f64) -> Result<Self> {
        let name = name.into();
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidWeight { name });
        }
        self.overrides.insert(name, weight);
        Ok(self)
    }

    /// `override[field] ?? override[category] ?? 1.0`
    pub fn resolve(&self, field: &str, category: FieldCategory) -> f64 {
        self.overrides.get(field).copied().unwrap_or_else(|| self.category(category))
    }

    pub fn category(&self, category: FieldCategory) -> f64 {
        self.overrides.get(category.name()).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Parse the `weights` block of a JSON profile.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self> {
        object.iter().try_fold(WeightConfig::new(), |config, (name, value)| {
            let weight = value.as_f64().ok_or_else(|| Error::InvalidWeight { name: name.clone() })?;
            config.with(name.as_str(), weight)
        })
    }
}

// --- Loading ------------------------------------------------------------------

/// Parse a JSON profile document into its fields and weight overrides.
pub fn parse_profile(text: &str) -> Result<(Profile, WeightConfig)> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(object) = value else {
        return Err(Error::NotAnObject { found: json_kind(&value) });
    };

    let weights = match object.get(WEIGHTS_KEY) {
        Some(Value::Object(block)) => WeightConfig::from_json_object(block)?,
        Some(Value::Null) | None => WeightConfig::new(),
        Some(_) => return Err(Error::InvalidWeight { name: WEIGHTS_KEY.to_string() }),
    };

    Ok((Profile::from_json_object(&object), weights))
}

/// Read and parse a JSON profile file.
pub fn load_profile(path: &Path) -> Result<(Profile, WeightConfig)> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let parsed = parse_profile(&text)?;
    tracing::debug!(path = %path.display(), fields = parsed.0.len(), "loaded profile");
    Ok(parsed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Example profile document with a weights block.
pub fn template() -> Value {
    json!({
        "firstname": "amir",
        "lastname": "hosseini",
        "nickname": "amirhos",
        "birthdate": "1999-08-15",
        "pet_name": "max",
        "city": "tehran",
        "birth_city": "mashhad",
        "country": "iran",
        "school": "tehran university",
        "workplace": "rayan fanavaran company",
        "id_card": "1234567890",
        "phone_number": "09123456789",
        "friend_names": ["reza", "sara"],
        "favorite_team": "persepolis",
        "weights": {
            "basic": 1.0,
            "family": 0.9,
            "relationships": 0.8,
            "education": 0.7,
            "work": 0.6,
            "favorites": 0.8,
            "dates": 0.9,
            "firstname": 1.2,
            "lastname": 1.1
        }
    })
}

/// Write [`template`] as pretty-printed JSON.
pub fn write_template(path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(&template())?;
    std::fs::write(path, text + "\n").map_err(|e| Error::io(path, e))
}

//! Core types: candidates, partial field sets, the final record and the
//! identifiers for each lookup method.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for a field whose value could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns `true` if `value` carries information (non-blank and not the
/// [`NOT_AVAILABLE`] sentinel).
pub fn is_meaningful(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_AVAILABLE
}

/// The scalar fields of a [`NameRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Gender,
    Origin,
    Religion,
    Meaning,
    HowToWrite,
    Syllables,
    LuckyNumber,
    LuckyColor,
    LuckyDay,
    LuckyMetal,
    LuckyStone,
}

impl Field {
    /// Returns every field in record order.
    pub fn all() -> &'static [Field] {
        &[
            Self::Name,
            Self::Gender,
            Self::Origin,
            Self::Religion,
            Self::Meaning,
            Self::HowToWrite,
            Self::Syllables,
            Self::LuckyNumber,
            Self::LuckyColor,
            Self::LuckyDay,
            Self::LuckyMetal,
            Self::LuckyStone,
        ]
    }
}

/// A partial set of field values. Each slot is filled at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFields {
    name: Option<String>,
    gender: Option<String>,
    origin: Option<String>,
    religion: Option<String>,
    meaning: Option<String>,
    how_to_write: Option<String>,
    syllables: Option<String>,
    lucky_number: Option<String>,
    lucky_color: Option<String>,
    lucky_day: Option<String>,
    lucky_metal: Option<String>,
    lucky_stone: Option<String>,
}

impl NameFields {
    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Gender => &self.gender,
            Field::Origin => &self.origin,
            Field::Religion => &self.religion,
            Field::Meaning => &self.meaning,
            Field::HowToWrite => &self.how_to_write,
            Field::Syllables => &self.syllables,
            Field::LuckyNumber => &self.lucky_number,
            Field::LuckyColor => &self.lucky_color,
            Field::LuckyDay => &self.lucky_day,
            Field::LuckyMetal => &self.lucky_metal,
            Field::LuckyStone => &self.lucky_stone,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Gender => &mut self.gender,
            Field::Origin => &mut self.origin,
            Field::Religion => &mut self.religion,
            Field::Meaning => &mut self.meaning,
            Field::HowToWrite => &mut self.how_to_write,
            Field::Syllables => &mut self.syllables,
            Field::LuckyNumber => &mut self.lucky_number,
            Field::LuckyColor => &mut self.lucky_color,
            Field::LuckyDay => &mut self.lucky_day,
            Field::LuckyMetal => &mut self.lucky_metal,
            Field::LuckyStone => &mut self.lucky_stone,
        }
    }

    /// Returns the value of `field`, if set.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Returns `true` if `field` already holds a value.
    pub fn is_set(&self, field: Field) -> bool {
        self.slot(field).is_some()
    }

    /// Store `value` in `field` unless the field is already set or the value
    /// is blank / the sentinel. Returns `true` if the value was stored.
    pub fn fill(&mut self, field: Field, value: &str) -> bool {
        let slot = self.slot_mut(field);
        if slot.is_some() || !is_meaningful(value) {
            return false;
        }
        *slot = Some(value.trim().to_owned());
        true
    }

    /// Builder-style [`fill`](Self::fill).
    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.fill(field, value);
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        Field::all().iter().all(|f| !self.is_set(*f))
    }
}

/// Child gender as used in the origin's URL layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Girl,
    Boy,
    GenderNeutral,
}

impl Gender {
    /// Genders whose path segment marks a name page in listing markup.
    pub const MARKERS: &'static [Gender] = &[Self::Girl, Self::Boy];

    /// URL path segment for this gender.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Girl => "girl",
            Self::Boy => "boy",
            Self::GenderNeutral => "gender-neutral",
        }
    }

    /// Display label used in records.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Girl => "Girl",
            Self::Boy => "Boy",
            Self::GenderNeutral => "Gender-Neutral",
        }
    }

    /// Parse a free-text gender label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "girl" | "female" | "f" => Some(Self::Girl),
            "boy" | "male" | "m" => Some(Self::Boy),
            "gender-neutral" | "gender neutral" | "neutral" | "unisex" => {
                Some(Self::GenderNeutral)
            }
            _ => None,
        }
    }

    /// Detect a gender marker segment (`/girl/` or `/boy/`) in a URL or path.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::MARKERS
            .iter()
            .copied()
            .find(|g| path.contains(&format!("/{}/", g.path_segment())))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A provisional record produced by one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Canonical detail-page URL, when known.
    pub url: Option<String>,
    /// Name, gender and any partial fields the strategy recovered.
    pub fields: NameFields,
}

impl Candidate {
    /// Create a candidate with a name and optional gender label and URL.
    pub fn new(name: &str, gender: Option<&str>, url: Option<String>) -> Self {
        let mut fields = NameFields::default();
        fields.fill(Field::Name, name);
        if let Some(gender) = gender {
            fields.fill(Field::Gender, gender);
        }
        Self { url, fields }
    }

    /// The candidate's name, or an empty string if none was recovered.
    pub fn name(&self) -> &str {
        self.fields.get(Field::Name).unwrap_or_default()
    }

    /// The candidate's gender label, if known.
    pub fn gender(&self) -> Option<&str> {
        self.fields.get(Field::Gender)
    }
}

/// Fields recovered from a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub fields: NameFields,
    /// Similar or related names in discovery order, deduplicated.
    pub similar_names: Vec<String>,
}

/// The final structured output of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRecord {
    pub name: String,
    pub url: Option<String>,
    pub gender: String,
    pub origin: String,
    pub religion: String,
    pub meaning: String,
    pub how_to_write: String,
    pub syllables: String,
    pub lucky_number: String,
    pub lucky_color: String,
    pub lucky_day: String,
    pub lucky_metal: String,
    pub lucky_stone: String,
    pub similar_names: Vec<String>,
}

/// The independent methods of locating candidates, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// JSON search endpoint.
    StructuredQuery,
    /// Rendered search-results page scanned for name links.
    ListingScan,
    /// Slug-derived detail URLs checked for existence.
    DirectProbe,
}

impl Method {
    /// Returns the human-readable name of this method.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StructuredQuery => "structured query",
            Self::ListingScan => "listing scan",
            Self::DirectProbe => "direct probe",
        }
    }

    /// Returns all methods in default priority order.
    pub fn all() -> &'static [Method] {
        &[Self::StructuredQuery, Self::ListingScan, Self::DirectProbe]
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered per-strategy failure notes. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<String>);

impl Diagnostics {
    /// Record a note for `method`.
    pub fn record(&mut self, method: Method, note: impl fmt::Display) {
        self.0.push(format!("{method}: {note}"));
    }

    /// The notes in the order they were recorded.
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

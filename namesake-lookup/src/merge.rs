//! Combine the primary candidate, detail-page fields and the rest of the
//! candidate pool into a [`NameRecord`].

use crate::detail::similar::MAX_SIMILAR_NAMES;
use crate::types::{Candidate, DetailFields, Field, NameRecord, NOT_AVAILABLE};

/// Build the final record.
///
/// For each scalar field a detail-page value wins over the primary
/// candidate's, which wins over [`NOT_AVAILABLE`]. The URL always comes from
/// the primary. Similar names come from the detail page, else from the other
/// pool entries.
pub fn merge(primary: &Candidate, others: &[Candidate], detail: Option<&DetailFields>) -> NameRecord {
    let value = |field: Field| -> String {
        detail
            .and_then(|d| d.fields.get(field))
            .or_else(|| primary.fields.get(field))
            .unwrap_or(NOT_AVAILABLE)
            .to_owned()
    };

    let similar_names = match detail {
        Some(d) if !d.similar_names.is_empty() => d.similar_names.clone(),
        _ => pool_names(others),
    };

    NameRecord {
        name: value(Field::Name),
        url: primary.url.clone(),
        gender: value(Field::Gender),
        origin: value(Field::Origin),
        religion: value(Field::Religion),
        meaning: value(Field::Meaning),
        how_to_write: value(Field::HowToWrite),
        syllables: value(Field::Syllables),
        lucky_number: value(Field::LuckyNumber),
        lucky_color: value(Field::LuckyColor),
        lucky_day: value(Field::LuckyDay),
        lucky_metal: value(Field::LuckyMetal),
        lucky_stone: value(Field::LuckyStone),
        similar_names,
    }
}

/// Names of the non-primary pool entries, in pool order, deduplicated.
fn pool_names(others: &[Candidate]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in others.iter().map(Candidate::name).filter(|n| !n.is_empty()) {
        if names.len() == MAX_SIMILAR_NAMES {
            break;
        }
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }
    names
}

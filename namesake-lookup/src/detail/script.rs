//! Native-script spelling detection for the "how to write" field.
//!
//! Detail pages often render the name in Arabic script without a label.
//! Detection is a pure predicate over code-point ranges.

use crate::types::{DetailFields, Field};
use scraper::{Html, Selector};

/// Arabic and Arabic Supplement blocks.
pub const ARABIC_RANGES: &[(char, char)] = &[('\u{0600}', '\u{06FF}'), ('\u{0750}', '\u{077F}')];

/// Script strings at or above this many characters are body text, not a name.
pub const MAX_SCRIPT_CHARS: usize = 50;

const SCRIPT_CANDIDATE_SELECTOR: &str = ".split-info-text, span, div";

/// Returns `true` if `c` lies in any of `ranges` (inclusive).
pub fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c))
}

/// Returns `true` if `text` is shorter than [`MAX_SCRIPT_CHARS`] and more
/// than half of its characters lie in `ranges`.
pub fn is_mostly_script(text: &str, ranges: &[(char, char)]) -> bool {
    let total = text.chars().count();
    if total == 0 || total >= MAX_SCRIPT_CHARS {
        return false;
    }
    let hits = text.chars().filter(|c| in_ranges(*c, ranges)).count();
    hits * 2 > total
}

/// Fill "how to write" from the first short Arabic-script string on the page.
pub fn script_fallback(document: &Html, detail: &mut DetailFields) {
    if detail.fields.is_set(Field::HowToWrite) {
        return;
    }
    let Ok(selector) = Selector::parse(SCRIPT_CANDIDATE_SELECTOR) else {
        return;
    };

    let found = document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .find(|text| is_mostly_script(text, ARABIC_RANGES));

    if let Some(text) = found {
        detail.fields.fill(Field::HowToWrite, &text);
    }
}

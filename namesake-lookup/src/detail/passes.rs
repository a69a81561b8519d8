//! Field passes: title, the origin's label/value layout, the meaning
//! fallback chain and a generic table/list scan.

use crate::types::{is_meaningful, DetailFields, Field};
use scraper::{ElementRef, Html, Selector};

/// Label keywords for the origin's own `split-info` layout.
const KNOWN_LAYOUT_KEYWORDS: &[(&str, Field)] = &[
    ("gender", Field::Gender),
    ("origin", Field::Origin),
    ("religion", Field::Religion),
    ("meaning", Field::Meaning),
    ("how to write", Field::HowToWrite),
    ("syllable", Field::Syllables),
    ("lucky number", Field::LuckyNumber),
    ("lucky color", Field::LuckyColor),
    ("lucky colour", Field::LuckyColor),
    ("lucky day", Field::LuckyDay),
    ("lucky metal", Field::LuckyMetal),
    ("lucky stone", Field::LuckyStone),
];

/// Label keywords for generic rows. Meaning is left to its own chain;
/// script names stand in for "how to write".
const GENERIC_ROW_KEYWORDS: &[(&str, Field)] = &[
    ("gender", Field::Gender),
    ("origin", Field::Origin),
    ("religion", Field::Religion),
    ("how to write", Field::HowToWrite),
    ("urdu", Field::HowToWrite),
    ("arabic", Field::HowToWrite),
    ("script", Field::HowToWrite),
    ("syllable", Field::Syllables),
    ("lucky number", Field::LuckyNumber),
    ("lucky color", Field::LuckyColor),
    ("lucky colour", Field::LuckyColor),
    ("lucky day", Field::LuckyDay),
    ("lucky metal", Field::LuckyMetal),
    ("lucky stone", Field::LuckyStone),
];

const GENERIC_ROW_SELECTOR: &str =
    "table tr, .info-table tr, .detail-table tr, ul li, .details-list li";

/// Page name from the first `h1`, else the `<title>` up to the first `-`.
pub fn title(document: &Html, detail: &mut DetailFields) {
    let heading = first_text(document, "h1").filter(|t| !t.is_empty());
    let name = heading.or_else(|| {
        first_text(document, "title")
            .and_then(|t| t.split('-').next().map(|s| s.trim().to_owned()))
    });
    if let Some(name) = name {
        detail.fields.fill(Field::Name, &name);
    }
}

/// Label/value rows of the origin's `split-info` layout.
pub fn known_layout(document: &Html, detail: &mut DetailFields) {
    let (Ok(row_sel), Ok(label_sel), Ok(value_sel)) = (
        Selector::parse(".split-info-row"),
        Selector::parse(".split-info-label"),
        Selector::parse(".split-info-text"),
    ) else {
        return;
    };

    for row in document.select(&row_sel) {
        let label = row
            .select(&label_sel)
            .next()
            .map(|el| element_text(&el).to_lowercase())
            .unwrap_or_default();
        let value = row
            .select(&value_sel)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default();
        if value.is_empty() {
            continue;
        }
        fill_by_label(detail, &label, &value, KNOWN_LAYOUT_KEYWORDS);
    }
}

/// Meaning from the meta description, a "Meaning" paragraph or a
/// dedicated `.meaning` element, in that order.
pub fn meaning_fallback(document: &Html, detail: &mut DetailFields) {
    if detail.fields.is_set(Field::Meaning) {
        return;
    }

    let from_meta = || {
        let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|c| c.trim().to_owned())
    };
    let from_paragraph = || {
        let selector = Selector::parse("p").ok()?;
        document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .find(|text| text.contains("Meaning"))
            .map(|text| strip_meaning_label(&text))
    };
    let from_element = || first_text(document, ".meaning");

    let sources: [&dyn Fn() -> Option<String>; 3] = [&from_meta, &from_paragraph, &from_element];
    let meaning = sources
        .iter()
        .find_map(|source| source().filter(|m| is_meaningful(m)));

    if let Some(meaning) = meaning {
        detail.fields.fill(Field::Meaning, &meaning);
    }
}

/// Generic table rows and list items for pages outside the known layout.
///
/// The label is the first cell-like child; the value is the last `td`, or
/// whatever follows the last colon.
pub fn generic_rows(document: &Html, detail: &mut DetailFields) {
    let (Ok(row_sel), Ok(label_sel), Ok(cell_sel)) = (
        Selector::parse(GENERIC_ROW_SELECTOR),
        Selector::parse("td, th, strong, b, .label"),
        Selector::parse("td"),
    ) else {
        return;
    };

    for row in document.select(&row_sel) {
        let label = row
            .select(&label_sel)
            .next()
            .map(|el| element_text(&el).to_lowercase())
            .unwrap_or_default();
        if label.is_empty() {
            continue;
        }

        let value = row
            .select(&cell_sel)
            .last()
            .map(|el| element_text(&el))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                let text = row.text().collect::<String>();
                text.rsplit(':').next().unwrap_or_default().trim().to_owned()
            });
        if !is_meaningful(&value) || value.to_lowercase() == label {
            continue;
        }
        fill_by_label(detail, &label, &value, GENERIC_ROW_KEYWORDS);
    }
}

/// Fill every field whose keyword occurs in `label`.
fn fill_by_label(detail: &mut DetailFields, label: &str, value: &str, keywords: &[(&str, Field)]) {
    for (keyword, field) in keywords {
        if label.contains(keyword) {
            detail.fields.fill(*field, value);
        }
    }
}

/// Remove the first "meaning" label (any case, optional colon).
fn strip_meaning_label(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let Some(start) = lower.find("meaning") else {
        return text.trim().to_owned();
    };
    let mut end = start + "meaning".len();
    if text[end..].starts_with(':') {
        end += 1;
    }
    format!("{}{}", &text[..start], &text[end..]).trim().to_owned()
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next().map(|el| element_text(&el))
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

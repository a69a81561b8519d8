//! Similar / related names listed near a "similar" or "related" heading.

use crate::types::{DetailFields, Gender};
use scraper::{ElementRef, Html, Selector};

/// Maximum number of similar names kept.
pub const MAX_SIMILAR_NAMES: usize = 10;

/// How many element siblings after a heading are searched for links.
const SIBLING_WINDOW: usize = 5;

/// Visible link text length bounds, in characters (inclusive).
const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=29;

/// Collect similar names unless a previous pass already did.
pub fn similar_names(document: &Html, detail: &mut DetailFields) {
    if !detail.similar_names.is_empty() {
        return;
    }
    detail.similar_names = collect_similar_names(document);
}

/// Links to name pages under each similar/related heading, deduplicated by
/// text, in discovery order, capped at [`MAX_SIMILAR_NAMES`].
pub fn collect_similar_names(document: &Html) -> Vec<String> {
    let (Ok(heading_sel), Ok(link_sel)) = (Selector::parse("h2, h3, h4, h5"), Selector::parse("a"))
    else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for heading in document.select(&heading_sel) {
        let text = heading.text().collect::<String>().to_lowercase();
        if !text.contains("similar") && !text.contains("related") {
            continue;
        }

        if let Some(container) = heading.parent().and_then(ElementRef::wrap) {
            collect_links(container, &link_sel, &mut names);
        }
        for sibling in heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take(SIBLING_WINDOW)
        {
            collect_links(sibling, &link_sel, &mut names);
        }
    }

    names.truncate(MAX_SIMILAR_NAMES);
    names
}

fn collect_links(scope: ElementRef<'_>, link_sel: &Selector, names: &mut Vec<String>) {
    for link in scope.select(link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if Gender::from_path(href).is_none() {
            continue;
        }
        let text = link.text().collect::<String>().trim().to_string();
        if !NAME_LEN.contains(&text.chars().count()) || names.contains(&text) {
            continue;
        }
        names.push(text);
    }
}

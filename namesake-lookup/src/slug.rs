//! Slug normalisation and canonical detail-page URL construction.

use crate::types::Gender;

/// Normalise a name into the origin's URL slug.
///
/// Lower-cases, collapses each run of internal whitespace into a single
/// hyphen, then strips every character outside `[a-z0-9-]`.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Build `{root}/{gender}/{slug}.html`, or `None` if the slug is empty.
pub fn detail_url(site_root: &str, gender: Gender, name: &str) -> Option<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}/{slug}.html",
        site_root.trim_end_matches('/'),
        gender.path_segment()
    ))
}

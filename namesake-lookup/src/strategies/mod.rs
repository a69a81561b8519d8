//! Candidate-discovery strategies.
//!
//! Each module provides a struct implementing [`crate::strategy::Strategy`]
//! against one surface of the origin site.

pub mod listing;
pub mod probe;
pub mod structured;

pub use listing::ListingScan;
pub use probe::DirectProbe;
pub use structured::StructuredQuery;

use url::Url;

/// Resolve `href` against the site root, leaving absolute URLs untouched.
pub(crate) fn resolve_href(site_root: &str, href: &str) -> Option<String> {
    let base = Url::parse(&format!("{}/", site_root.trim_end_matches('/'))).ok()?;
    base.join(href.trim()).ok().map(String::from)
}

//! Detail-page extraction.
//!
//! A detail page is parsed once and handed to an ordered list of
//! independent passes. Each pass fills only the fields that are still unset,
//! so the first pass to find a value wins and later, more generic passes act
//! purely as fallbacks.
//!
//! Site-specific knowledge lives in the early passes ([`passes::title`],
//! [`passes::known_layout`]); the rest work on any reasonably structured
//! page.

pub mod passes;
pub mod script;
pub mod similar;

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::{CallKind, FetchOptions, Fetcher};
use crate::types::DetailFields;
use scraper::Html;

/// One extraction pass over a parsed detail page.
pub type Pass = fn(&Html, &mut DetailFields);

/// Passes in precedence order.
pub const PASSES: &[(&str, Pass)] = &[
    ("title", passes::title),
    ("known layout", passes::known_layout),
    ("meaning fallback", passes::meaning_fallback),
    ("generic rows", passes::generic_rows),
    ("similar names", similar::similar_names),
    ("script fallback", script::script_fallback),
];

/// Fetch `url` and extract every field the page offers.
///
/// Never fails: a network error or an empty body is logged and yields
/// `None`, and the caller falls back to search-result data.
pub async fn extract(
    url: &str,
    fetcher: &dyn Fetcher,
    config: &LookupConfig,
) -> Option<DetailFields> {
    match fetch_detail(url, fetcher, config).await {
        Ok(detail) => Some(detail),
        Err(err) => {
            tracing::warn!(url, error = %err, "detail extraction failed");
            None
        }
    }
}

async fn fetch_detail(
    url: &str,
    fetcher: &dyn Fetcher,
    config: &LookupConfig,
) -> Result<DetailFields, LookupError> {
    let options = FetchOptions::for_call(CallKind::Detail, config);
    let html = fetcher.get(url, &options).await?;
    if html.trim().is_empty() {
        return Err(LookupError::Parse("detail page is empty".into()));
    }
    tracing::trace!(bytes = html.len(), "detail page received");
    Ok(parse_detail_html(&html))
}

/// Run every pass over `html`.
///
/// Extracted as a separate function for testability with mock HTML.
pub fn parse_detail_html(html: &str) -> DetailFields {
    let document = Html::parse_document(html);
    let mut detail = DetailFields::default();
    for (name, pass) in PASSES {
        pass(&document, &mut detail);
        tracing::trace!(pass = name, "detail pass complete");
    }
    detail
}

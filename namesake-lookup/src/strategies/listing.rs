//! Listing scan: heuristics over the rendered search-results page.
//!
//! The results page has no stable result container, so the primary pass
//! looks at every link and keeps the ones that point at a name page and
//! mention the query. Some layouts render results as cards instead; those
//! are picked up by a secondary pass.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::{CallKind, FetchOptions, Fetcher};
use crate::strategy::Strategy;
use crate::types::{Candidate, Field, Gender, Method};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::resolve_href;

/// Rendered search-results page strategy.
pub struct ListingScan;

#[async_trait]
impl Strategy for ListingScan {
    async fn attempt(
        &self,
        query: &str,
        fetcher: &dyn Fetcher,
        config: &LookupConfig,
    ) -> Result<Vec<Candidate>, LookupError> {
        tracing::trace!(query, "listing scan");

        let url = listing_url(config.site_root(), query)?;
        let options = FetchOptions::for_call(CallKind::Listing, config);
        let html = fetcher.get(&url, &options).await?;

        tracing::trace!(bytes = html.len(), "listing page received");

        parse_listing_html(&html, query, config.site_root())
    }

    fn method(&self) -> Method {
        Method::ListingScan
    }
}

/// URL of the rendered search-results page for `query`.
pub(crate) fn listing_url(site_root: &str, query: &str) -> Result<String, LookupError> {
    Url::parse_with_params(&format!("{site_root}/search.php"), &[("search", query)])
        .map(String::from)
        .map_err(|e| LookupError::Config(format!("invalid listing URL: {e}")))
}

/// Parse a search-results page into candidates.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_listing_html(
    html: &str,
    query: &str,
    site_root: &str,
) -> Result<Vec<Candidate>, LookupError> {
    let document = Html::parse_document(html);

    let mut candidates = scan_name_links(&document, query, site_root)?;
    if candidates.is_empty() {
        candidates = scan_name_cards(&document, site_root)?;
        if !candidates.is_empty() {
            tracing::debug!(count = candidates.len(), "listing matched name cards");
        }
    }

    tracing::debug!(count = candidates.len(), "listing results parsed");
    Ok(candidates)
}

/// Primary pass: any link under a gender marker whose text mentions the query.
fn scan_name_links(
    document: &Html,
    query: &str,
    site_root: &str,
) -> Result<Vec<Candidate>, LookupError> {
    let link_sel = selector("a[href]")?;
    let needle = query.trim().to_lowercase();

    let mut candidates = Vec::new();
    for link in document.select(&link_sel) {
        let Some(url) = link
            .value()
            .attr("href")
            .and_then(|href| resolve_href(site_root, href))
        else {
            continue;
        };
        let Some(gender) = Gender::from_path(&url) else {
            continue;
        };
        let text = element_text(&link);
        if text.is_empty() || !text.to_lowercase().contains(&needle) {
            continue;
        }
        candidates.push(Candidate::new(&text, Some(gender.label()), Some(url)));
    }
    Ok(candidates)
}

/// Secondary pass: dedicated result cards with a heading and a blurb.
fn scan_name_cards(document: &Html, site_root: &str) -> Result<Vec<Candidate>, LookupError> {
    let card_sel = selector("a.name-card")?;
    let heading_sel = selector("h3")?;
    let blurb_sel = selector("p")?;

    let mut candidates = Vec::new();
    for card in document.select(&card_sel) {
        let Some(url) = card
            .value()
            .attr("href")
            .and_then(|href| resolve_href(site_root, href))
        else {
            continue;
        };
        let name = card
            .select(&heading_sel)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let gender = Gender::from_path(&url).map(|g| g.label());
        let mut candidate = Candidate::new(&name, gender, Some(url));
        if let Some(blurb) = card.select(&blurb_sel).next() {
            candidate.fields.fill(Field::Meaning, &element_text(&blurb));
        }
        candidates.push(candidate);
    }
    Ok(candidates)
}

fn selector(css: &str) -> Result<Selector, LookupError> {
    Selector::parse(css).map_err(|e| LookupError::Parse(format!("invalid selector {css}: {e:?}")))
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

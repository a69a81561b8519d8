//! Structured query: the origin's JSON search endpoint.
//!
//! Cheapest and most complete when it answers, but the endpoint is an
//! internal AJAX route and frequently returns HTML or an error instead.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::{CallKind, FetchOptions, Fetcher};
use crate::strategy::Strategy;
use crate::types::{Candidate, Field, Method, NameFields};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::resolve_href;

/// Inbound key synonyms per field. The first non-empty key wins.
const FIELD_SYNONYMS: &[(Field, &[&str])] = &[
    (Field::Name, &["name"]),
    (Field::Gender, &["gender"]),
    (Field::Origin, &["origin"]),
    (Field::Religion, &["religion"]),
    (Field::Meaning, &["meaning", "u_mean"]),
    (Field::HowToWrite, &["translated_names", "urdu", "name_urdu"]),
    (Field::Syllables, &["syllables"]),
    (Field::LuckyNumber, &["lucky_no", "lucky_number"]),
    (Field::LuckyColor, &["lucky_color"]),
    (Field::LuckyDay, &["lucky_day"]),
    (Field::LuckyMetal, &["lucky_metal"]),
    (Field::LuckyStone, &["lucky_stone"]),
];

const URL_SYNONYMS: &[&str] = &["url", "link"];

/// JSON search endpoint strategy.
pub struct StructuredQuery;

#[async_trait]
impl Strategy for StructuredQuery {
    async fn attempt(
        &self,
        query: &str,
        fetcher: &dyn Fetcher,
        config: &LookupConfig,
    ) -> Result<Vec<Candidate>, LookupError> {
        tracing::trace!(query, "structured query");

        let url = search_url(config.site_root(), query)?;
        let options = FetchOptions::for_call(CallKind::StructuredQuery, config);
        let body = fetcher.get(&url, &options).await?;

        parse_structured_results(&body, query, config.site_root())
    }

    fn method(&self) -> Method {
        Method::StructuredQuery
    }
}

/// URL of the JSON search endpoint for `query`.
pub(crate) fn search_url(site_root: &str, query: &str) -> Result<String, LookupError> {
    Url::parse_with_params(
        &format!("{site_root}/search.php"),
        &[
            ("action", "search"),
            ("query", query),
            ("gender", ""),
            ("offset", "0"),
            ("limit", "20"),
        ],
    )
    .map(String::from)
    .map_err(|e| LookupError::Config(format!("invalid search URL: {e}")))
}

/// Parse the endpoint's JSON body into candidates.
///
/// Extracted as a separate function for testability with canned bodies.
pub(crate) fn parse_structured_results(
    body: &str,
    query: &str,
    site_root: &str,
) -> Result<Vec<Candidate>, LookupError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| LookupError::Parse(format!("response is not JSON: {e}")))?;

    let results = value
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| LookupError::Parse("response has no results list".into()))?;

    let candidates: Vec<Candidate> = results
        .iter()
        .filter(|item| item.is_object())
        .map(|item| normalise_item(item, query, site_root))
        .collect();

    tracing::debug!(count = candidates.len(), "structured query results parsed");
    Ok(candidates)
}

fn normalise_item(item: &Value, query: &str, site_root: &str) -> Candidate {
    let mut fields = NameFields::default();
    for (field, keys) in FIELD_SYNONYMS {
        if let Some(value) = first_text(item, keys) {
            fields.fill(*field, &value);
        }
    }
    fields.fill(Field::Name, query);

    let url = first_text(item, URL_SYNONYMS).and_then(|href| resolve_href(site_root, &href));
    Candidate { url, fields }
}

/// First key among `keys` holding a non-blank string or a number.
fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

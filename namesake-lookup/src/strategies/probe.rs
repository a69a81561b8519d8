//! Direct probe: guess the canonical detail URL from the query's slug.
//!
//! Last resort when neither search surface answers. Costs one existence
//! check per template and finds only exact slug matches.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::{CallKind, FetchOptions, Fetcher};
use crate::slug::{detail_url, slugify};
use crate::strategy::Strategy;
use crate::types::{Candidate, Gender, Method};
use async_trait::async_trait;

/// Gender templates in probe order.
const PROBE_ORDER: &[Gender] = &[Gender::Girl, Gender::Boy];

/// Slug-guessing strategy.
pub struct DirectProbe;

#[async_trait]
impl Strategy for DirectProbe {
    async fn attempt(
        &self,
        query: &str,
        fetcher: &dyn Fetcher,
        config: &LookupConfig,
    ) -> Result<Vec<Candidate>, LookupError> {
        tracing::trace!(query, "direct probe");

        let name = query.trim();
        if slugify(name).is_empty() {
            return Err(LookupError::Parse(
                "query has no URL-safe characters to probe".into(),
            ));
        }

        for gender in PROBE_ORDER {
            let Some(url) = detail_url(config.site_root(), *gender, name) else {
                continue;
            };
            let options = FetchOptions::for_call(CallKind::Probe, config);
            match fetcher.exists(&url, &options).await {
                Ok(true) => {
                    tracing::debug!(%gender, url = %url, "direct probe hit");
                    return Ok(vec![Candidate::new(name, Some(gender.label()), Some(url))]);
                }
                Ok(false) => tracing::debug!(%gender, url = %url, "direct probe miss"),
                Err(err) => tracing::debug!(%gender, url = %url, error = %err, "direct probe failed"),
            }
        }

        Err(LookupError::Http("no direct URL match found".into()))
    }

    fn method(&self) -> Method {
        Method::DirectProbe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedFetcher;

    const ROOT: &str = "https://origin.test";

    #[tokio::test]
    async fn girl_template_probed_first() {
        let config = LookupConfig::for_origin(ROOT);
        let fetcher = ScriptedFetcher::default()
            .with_probe("https://origin.test/girl/emma.html", true)
            .with_probe("https://origin.test/boy/emma.html", true);

        let results = DirectProbe
            .attempt("Emma", &fetcher, &config)
            .await
            .expect("should find");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].gender(), Some("Girl"));
        assert_eq!(
            fetcher.calls(),
            vec!["HEAD https://origin.test/girl/emma.html".to_owned()]
        );
    }

    #[tokio::test]
    async fn falls_through_to_boy_template() {
        let config = LookupConfig::for_origin(ROOT);
        let fetcher = ScriptedFetcher::default()
            .with_probe("https://origin.test/girl/noah.html", false)
            .with_probe("https://origin.test/boy/noah.html", true);

        let results = DirectProbe
            .attempt(" Noah ", &fetcher, &config)
            .await
            .expect("should find");
        assert_eq!(results[0].name(), "Noah");
        assert_eq!(results[0].gender(), Some("Boy"));
        assert_eq!(
            results[0].url.as_deref(),
            Some("https://origin.test/boy/noah.html")
        );
    }

    #[tokio::test]
    async fn probe_errors_are_swallowed() {
        let config = LookupConfig::for_origin(ROOT);
        let fetcher = ScriptedFetcher::default()
            .with_probe_error("https://origin.test/girl/anna-maria.html", "connection reset")
            .with_probe("https://origin.test/boy/anna-maria.html", true);

        let results = DirectProbe
            .attempt("Anna Maria", &fetcher, &config)
            .await
            .expect("should find");
        assert_eq!(results[0].name(), "Anna Maria");
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn probes_bounded_by_template_count() {
        let config = LookupConfig::for_origin(ROOT);
        let fetcher = ScriptedFetcher::default();

        let err = DirectProbe
            .attempt("Nobody", &fetcher, &config)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no direct URL match"));
        assert_eq!(fetcher.calls().len(), PROBE_ORDER.len());
    }

    #[tokio::test]
    async fn unsluggable_query_makes_no_calls() {
        let config = LookupConfig::for_origin(ROOT);
        let fetcher = ScriptedFetcher::default();

        let result = DirectProbe.attempt("!!!", &fetcher, &config).await;
        assert!(matches!(result, Err(LookupError::Parse(_))));
        assert!(fetcher.calls().is_empty());
    }

    #[test]
    fn method_is_direct_probe() {
        assert_eq!(DirectProbe.method(), Method::DirectProbe);
    }
}

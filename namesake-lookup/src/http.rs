//! Outbound HTTP capability with identity rotation and request jitter.
//!
//! The core never talks to `reqwest` directly. Strategies and the detail
//! extractor go through the [`Fetcher`] trait, passing a [`FetchOptions`]
//! built from [`LookupConfig`] for the kind of call being made. That keeps
//! headers, timeouts and delays out of the parsing code and lets tests swap
//! in a scripted fetcher.

use crate::config::{CallProfile, LookupConfig};
use crate::error::LookupError;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// The kinds of outbound call the lookup makes. Each has its own header
/// profile, timeout and jitter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    StructuredQuery,
    Listing,
    Detail,
    Probe,
}

/// Per-request headers, timeout and pre-request delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub headers: Vec<(&'static str, String)>,
    pub timeout: Duration,
    /// Random delay range in milliseconds applied before the request.
    pub delay_ms: (u64, u64),
}

impl FetchOptions {
    /// Build the options for `kind`, drawing a fresh identity from the
    /// configured pool.
    pub fn for_call(kind: CallKind, config: &LookupConfig) -> Self {
        let site_referer = format!("{}/", config.site_root());
        let mut headers = vec![("User-Agent", pick_identity(&config.user_agents))];

        let profile: CallProfile = match kind {
            CallKind::StructuredQuery => {
                headers.push(("Accept", ACCEPT_JSON.to_owned()));
                headers.push(("Accept-Language", config.accept_language.clone()));
                headers.push(("Referer", site_referer));
                headers.push(("X-Requested-With", "XMLHttpRequest".to_owned()));
                config.structured_query
            }
            CallKind::Listing => {
                headers.push(("Accept", ACCEPT_HTML.to_owned()));
                headers.push(("Accept-Language", config.accept_language.clone()));
                headers.push(("Referer", config.listing_referer.clone()));
                config.listing
            }
            CallKind::Detail => {
                headers.push(("Accept", ACCEPT_HTML.to_owned()));
                headers.push(("Accept-Language", config.accept_language.clone()));
                headers.push(("Referer", site_referer));
                config.detail
            }
            CallKind::Probe => config.probe,
        };

        Self {
            headers,
            timeout: profile.timeout(),
            delay_ms: profile.delay_ms,
        }
    }

    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The outbound HTTP capability the lookup depends on.
///
/// Implementations must honour the timeout and delay carried by
/// [`FetchOptions`] and must not retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] on transport failure or a non-success
    /// status, [`LookupError::Timeout`] when the timeout elapses.
    async fn get(&self, url: &str, options: &FetchOptions) -> Result<String, LookupError>;

    /// Lightweight existence check of `url`.
    ///
    /// Returns `Ok(false)` when the origin answers with a client error.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get) for transport failures and server errors.
    async fn exists(&self, url: &str, options: &FetchOptions) -> Result<bool, LookupError>;
}

/// [`Fetcher`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a client from [`build_client`].
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the client cannot be constructed.
    pub fn new() -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client()?,
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        options: &FetchOptions,
    ) -> reqwest::RequestBuilder {
        options.headers.iter().fold(
            self.client.request(method, url).timeout(options.timeout),
            |builder, (name, value)| builder.header(*name, value.as_str()),
        )
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, options: &FetchOptions) -> Result<String, LookupError> {
        tokio::time::sleep(jitter(options.delay_ms)).await;
        tracing::trace!(url, "GET");

        let response = self
            .request(reqwest::Method::GET, url, options)
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest("request failed", &e))?
            .error_for_status()
            .map_err(|e| LookupError::Http(format!("bad status: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::from_reqwest("response read failed", &e))?;

        tracing::trace!(bytes = body.len(), "response received");
        Ok(body)
    }

    async fn exists(&self, url: &str, options: &FetchOptions) -> Result<bool, LookupError> {
        tokio::time::sleep(jitter(options.delay_ms)).await;
        tracing::trace!(url, "HEAD");

        let response = self
            .request(reqwest::Method::HEAD, url, options)
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest("probe failed", &e))?;

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status.is_client_error() {
            Ok(false)
        } else {
            Err(LookupError::Http(format!("probe returned {status}")))
        }
    }
}

/// Build a [`reqwest::Client`] configured for scraping the origin.
///
/// The client has no cookie store, so no state carries over between
/// lookups. It has a bounded redirect policy and brotli/gzip
/// decompression. Identity and timeouts are applied per request.
///
/// # Errors
///
/// Returns [`LookupError::Http`] if the client cannot be constructed.
pub fn build_client() -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| LookupError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random non-blank identity from `pool`.
pub fn pick_identity(pool: &[String]) -> String {
    let usable: Vec<&String> = pool.iter().filter(|ua| !ua.trim().is_empty()).collect();
    let mut rng = rand::thread_rng();
    usable
        .choose(&mut rng)
        .map(|ua| (*ua).clone())
        .unwrap_or_default()
}

/// Sample a delay from an inclusive millisecond range.
pub fn jitter((min, max): (u64, u64)) -> Duration {
    if max <= min {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_identity_draws_from_pool() {
        let config = LookupConfig::default();
        let ua = pick_identity(&config.user_agents);
        assert!(config.user_agents.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn pick_identity_skips_blank_entries() {
        let pool = vec!["  ".to_owned(), "OnlyBot/1.0".to_owned()];
        for _ in 0..20 {
            assert_eq!(pick_identity(&pool), "OnlyBot/1.0");
        }
    }

    #[test]
    fn jitter_stays_in_range() {
        for _ in 0..50 {
            let d = jitter((100, 400));
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(400));
        }
        assert_eq!(jitter((0, 0)), Duration::ZERO);
    }

    #[test]
    fn structured_query_options_negotiate_json() {
        let config = LookupConfig::for_origin("http://origin.test");
        let opts = FetchOptions::for_call(CallKind::StructuredQuery, &config);
        assert!(opts.header("accept").is_some_and(|v| v.contains("application/json")));
        assert_eq!(opts.header("X-Requested-With"), Some("XMLHttpRequest"));
        assert_eq!(opts.header("Referer"), Some("http://origin.test/"));
        assert_eq!(opts.header("User-Agent"), Some("namesake-test/1.0"));
        assert_eq!(opts.timeout, Duration::from_millis(5_000));
    }

    #[test]
    fn listing_options_use_search_engine_referer() {
        let config = LookupConfig::default();
        let opts = FetchOptions::for_call(CallKind::Listing, &config);
        assert_eq!(opts.header("Referer"), Some("https://www.google.com/"));
        assert!(opts.header("Accept").is_some_and(|v| v.starts_with("text/html")));
        assert_eq!(opts.delay_ms, (200, 700));
    }

    #[test]
    fn probe_options_carry_identity_only() {
        let config = LookupConfig::default();
        let opts = FetchOptions::for_call(CallKind::Probe, &config);
        assert_eq!(opts.headers.len(), 1);
        assert!(opts.header("User-Agent").is_some());
        assert!(opts.timeout < FetchOptions::for_call(CallKind::Detail, &config).timeout);
    }

    #[test]
    fn build_client_succeeds() {
        assert!(build_client().is_ok());
    }

    #[test]
    fn http_fetcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpFetcher>();
    }
}

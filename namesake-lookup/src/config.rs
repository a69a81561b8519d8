//! Lookup configuration with sensible defaults.
//!
//! [`LookupConfig`] controls the origin, the outbound identity pool, and the
//! timeout and jitter applied to each kind of call. The defaults are tuned
//! for polite scraping of a single site.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per request.
const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Timeout and pre-request jitter for one kind of outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallProfile {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Random delay range in milliseconds `(min, max)` before the request.
    pub delay_ms: (u64, u64),
}

impl CallProfile {
    pub const fn new(timeout_ms: u64, delay_ms: (u64, u64)) -> Self {
        Self {
            timeout_ms,
            delay_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn validate(&self, label: &str) -> Result<(), LookupError> {
        if self.timeout_ms == 0 {
            return Err(LookupError::Config(format!(
                "{label}.timeout_ms must be greater than 0"
            )));
        }
        if self.delay_ms.0 > self.delay_ms.1 {
            return Err(LookupError::Config(format!(
                "{label}.delay_ms min must be <= max"
            )));
        }
        Ok(())
    }
}

/// Configuration for a name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Site root every strategy targets, without a trailing slash.
    pub base_url: String,
    /// Identity pool. One entry is picked at random per request.
    pub user_agents: Vec<String>,
    /// `Accept-Language` sent with every request.
    pub accept_language: String,
    /// `Referer` sent with the listing-page request.
    pub listing_referer: String,
    /// JSON search endpoint call.
    pub structured_query: CallProfile,
    /// Rendered search-results page fetch.
    pub listing: CallProfile,
    /// Detail page fetch.
    pub detail: CallProfile,
    /// Existence check of a guessed detail URL.
    pub probe: CallProfile,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://babynamemeaningz.com".to_owned(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| (*s).to_owned()).collect(),
            accept_language: "en-US,en;q=0.9".to_owned(),
            listing_referer: "https://www.google.com/".to_owned(),
            structured_query: CallProfile::new(5_000, (100, 400)),
            listing: CallProfile::new(8_000, (200, 700)),
            detail: CallProfile::new(8_000, (200, 700)),
            probe: CallProfile::new(5_000, (100, 400)),
        }
    }
}

impl LookupConfig {
    /// A config aimed at `base_url` with no jitter and a single fixed
    /// identity, for tests and local mirrors.
    pub fn for_origin(base_url: impl Into<String>) -> Self {
        let no_delay = |p: CallProfile| CallProfile::new(p.timeout_ms, (0, 0));
        let defaults = Self::default();
        Self {
            base_url: base_url.into(),
            user_agents: vec!["namesake-test/1.0".to_owned()],
            structured_query: no_delay(defaults.structured_query),
            listing: no_delay(defaults.listing),
            detail: no_delay(defaults.detail),
            probe: no_delay(defaults.probe),
            ..defaults
        }
    }

    /// Site root with any trailing slash removed.
    pub fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be an absolute http(s) URL
    /// - `user_agents` must not be empty
    /// - every call profile has a non-zero timeout and `delay_ms.0 <= delay_ms.1`
    pub fn validate(&self) -> Result<(), LookupError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| LookupError::Config(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LookupError::Config(
                "base_url must use http or https".into(),
            ));
        }
        if self.user_agents.iter().all(|ua| ua.trim().is_empty()) {
            return Err(LookupError::Config(
                "user_agents must contain at least one entry".into(),
            ));
        }
        self.structured_query.validate("structured_query")?;
        self.listing.validate("listing")?;
        self.detail.validate("detail")?;
        self.probe.validate("probe")?;
        Ok(())
    }
}

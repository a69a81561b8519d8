//! # namesake-lookup
//!
//! Baby-name lookup against a single name-meaning site, with graceful
//! fallback across unreliable retrieval methods.
//!
//! A free-text query is resolved by trying three independent strategies in
//! cost order and stopping at the first one that finds anything. The leading
//! candidate's detail page is then scraped with layered heuristics and the
//! results are merged into one [`NameRecord`].
//!
//! ## Design
//!
//! - Strategies: the site's JSON search endpoint, its rendered results page,
//!   and a slug-derived direct URL probe
//! - Detail extraction as an ordered list of independent passes over one
//!   parsed document
//! - User-Agent rotation and request jitter for every outbound call
//! - Strategy and extraction failures degrade to diagnostics and search data
//!   rather than errors
//!
//! ## Security
//!
//! - No API keys or secrets
//! - Queries are logged only at trace level

pub mod config;
pub mod detail;
pub mod error;
pub mod http;
pub mod merge;
pub mod resolver;
pub mod slug;
pub mod strategies;
pub mod strategy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{CallProfile, LookupConfig};
pub use error::{LookupError, Result};
pub use http::{FetchOptions, Fetcher, HttpFetcher};
pub use resolver::Resolver;
pub use strategy::Strategy;
pub use types::{Gender, Method, NameRecord, NOT_AVAILABLE};

use std::sync::Arc;

/// Look up a name against the configured origin.
///
/// Builds an [`HttpFetcher`] and a [`Resolver`] with the default strategy
/// chain. Services resolving many queries should build one [`Resolver`] and
/// reuse it.
///
/// # Errors
///
/// Returns [`LookupError::Config`] if `config` is invalid,
/// [`LookupError::MissingParameter`] for a blank query and
/// [`LookupError::NotFound`] if no strategy found a candidate.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> namesake_lookup::Result<()> {
/// let config = namesake_lookup::LookupConfig::default();
/// let record = namesake_lookup::resolve("Emma", &config).await?;
/// println!("{}: {}", record.name, record.meaning);
/// # Ok(())
/// # }
/// ```
pub async fn resolve(query: &str, config: &LookupConfig) -> Result<NameRecord> {
    config.validate()?;
    let fetcher = Arc::new(HttpFetcher::new()?);
    Resolver::new(fetcher, config.clone()).resolve(query).await
}

//! Resolution pipeline: strategies in order, then detail extraction and
//! merge.
//!
//! The resolver tries each [`Strategy`] in turn and stops at the first one
//! that yields at least one candidate. Strategy failures are recorded in
//! [`Diagnostics`] and never escape. If no strategy finds anything the
//! diagnostics are returned inside [`LookupError::NotFound`].

use crate::config::LookupConfig;
use crate::detail;
use crate::error::{LookupError, Result};
use crate::http::Fetcher;
use crate::merge::merge;
use crate::slug::detail_url;
use crate::strategies::{DirectProbe, ListingScan, StructuredQuery};
use crate::strategy::Strategy;
use crate::types::{Candidate, Diagnostics, Gender, NameRecord};
use std::sync::Arc;

/// Returns the default strategy chain: structured query, listing scan,
/// direct probe.
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(StructuredQuery),
        Box::new(ListingScan),
        Box::new(DirectProbe),
    ]
}

/// Turns free-text name queries into [`NameRecord`]s.
pub struct Resolver {
    fetcher: Arc<dyn Fetcher>,
    config: LookupConfig,
    strategies: Vec<Box<dyn Strategy>>,
}

impl Resolver {
    /// Create a resolver with the default strategy chain.
    pub fn new(fetcher: Arc<dyn Fetcher>, config: LookupConfig) -> Self {
        Self::with_strategies(fetcher, config, default_strategies())
    }

    /// Create a resolver with a custom, ordered strategy chain.
    pub fn with_strategies(
        fetcher: Arc<dyn Fetcher>,
        config: LookupConfig,
        strategies: Vec<Box<dyn Strategy>>,
    ) -> Self {
        Self {
            fetcher,
            config,
            strategies,
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Resolve `query` into a record.
    ///
    /// # Errors
    ///
    /// - [`LookupError::MissingParameter`] if `query` is blank; no outbound
    ///   call is made.
    /// - [`LookupError::NotFound`] carrying the joined diagnostics if every
    ///   strategy came back empty.
    pub async fn resolve(&self, query: &str) -> Result<NameRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::MissingParameter("name".into()));
        }
        tracing::trace!(query, "resolving name");

        let mut pool = self.discover(query).await?;
        let mut primary = pool.remove(0);

        if primary.url.is_none() {
            primary.url = construct_url(&self.config, &primary);
        }

        let extracted = match primary.url.as_deref() {
            Some(url) => detail::extract(url, self.fetcher.as_ref(), &self.config).await,
            None => None,
        };

        Ok(merge(&primary, &pool, extracted.as_ref()))
    }

    /// Run the strategy chain, returning the first non-empty pool.
    async fn discover(&self, query: &str) -> Result<Vec<Candidate>> {
        let mut diagnostics = Diagnostics::default();

        for strategy in &self.strategies {
            let method = strategy.method();
            match strategy
                .attempt(query, self.fetcher.as_ref(), &self.config)
                .await
            {
                Ok(pool) if !pool.is_empty() => {
                    tracing::debug!(%method, candidates = pool.len(), "strategy succeeded");
                    return Ok(pool);
                }
                Ok(_) => {
                    tracing::debug!(%method, "strategy found no candidates");
                    diagnostics.record(method, "no candidates");
                }
                Err(err) => {
                    tracing::warn!(%method, error = %err, "strategy failed");
                    diagnostics.record(method, &err);
                }
            }
        }

        Err(LookupError::NotFound(diagnostics.to_string()))
    }
}

/// Build the canonical detail URL for a candidate that has a name and a
/// recognised gender label.
fn construct_url(config: &LookupConfig, candidate: &Candidate) -> Option<String> {
    let name = candidate.name();
    let gender = candidate.gender().and_then(Gender::from_label)?;
    let url = detail_url(config.site_root(), gender, name)?;
    tracing::debug!(url = %url, "constructed detail URL");
    Some(url)
}

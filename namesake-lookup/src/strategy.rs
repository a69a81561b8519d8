//! Trait definition for pluggable candidate-discovery strategies.
//!
//! Each lookup method (structured query, listing scan, direct probe)
//! implements [`Strategy`] so the resolver can hold them as an ordered list
//! and stop at the first one that finds anything.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::Fetcher;
use crate::types::{Candidate, Method};
use async_trait::async_trait;

/// One independent method of locating candidates for a query.
///
/// Implementors handle their own URL construction, request profile and
/// parsing. Failures are returned as errors; the resolver turns them into a
/// diagnostics line and moves on, so an implementation never needs to catch
/// its own errors.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Look up candidates for `query`, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the origin cannot be reached or its
    /// response cannot be interpreted.
    async fn attempt(
        &self,
        query: &str,
        fetcher: &dyn Fetcher,
        config: &LookupConfig,
    ) -> Result<Vec<Candidate>, LookupError>;

    /// Returns which [`Method`] this implementation represents.
    fn method(&self) -> Method;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedFetcher;

    /// A mock strategy for testing trait bounds and dynamic dispatch.
    struct MockStrategy {
        method: Method,
        candidates: Vec<Candidate>,
    }

    #[async_trait]
    impl Strategy for MockStrategy {
        async fn attempt(
            &self,
            _query: &str,
            _fetcher: &dyn Fetcher,
            _config: &LookupConfig,
        ) -> Result<Vec<Candidate>, LookupError> {
            if self.candidates.is_empty() {
                return Err(LookupError::Parse("mock strategy failure".into()));
            }
            Ok(self.candidates.clone())
        }

        fn method(&self) -> Method {
            self.method
        }
    }

    #[tokio::test]
    async fn boxed_strategies_dispatch_in_order() {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(MockStrategy {
                method: Method::StructuredQuery,
                candidates: vec![],
            }),
            Box::new(MockStrategy {
                method: Method::ListingScan,
                candidates: vec![Candidate::new("Emma", Some("Girl"), None)],
            }),
        ];
        let fetcher = ScriptedFetcher::default();
        let config = LookupConfig::default();

        let first = strategies[0].attempt("emma", &fetcher, &config).await;
        assert!(first
            .unwrap_err()
            .to_string()
            .contains("mock strategy failure"));

        let second = strategies[1]
            .attempt("emma", &fetcher, &config)
            .await
            .expect("should succeed");
        assert_eq!(second[0].name(), "Emma");
        assert_eq!(strategies[1].method(), Method::ListingScan);
    }

    #[test]
    fn strategy_objects_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Strategy>();
    }
}

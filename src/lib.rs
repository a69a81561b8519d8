//! # namesake
//!
//! HTTP service answering baby-name lookups.
//!
//! The resolution pipeline lives in the `namesake-lookup` crate; this crate
//! adds the JSON endpoint, the TOML configuration file and the binary.

pub mod config;
pub mod error;
pub mod server;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use server::{AppState, SearchServer, router};

use namesake_lookup::{HttpFetcher, Resolver};
use std::sync::Arc;

/// Build a resolver over the production HTTP fetcher from `config`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client
/// cannot be constructed.
pub fn build_resolver(config: &ServiceConfig) -> Result<Arc<Resolver>> {
    config.validate()?;
    let fetcher = Arc::new(HttpFetcher::new()?);
    Ok(Arc::new(Resolver::new(fetcher, config.lookup.clone())))
}

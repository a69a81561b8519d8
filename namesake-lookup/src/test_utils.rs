//! Shared test utilities used across unit test modules.

use crate::error::LookupError;
use crate::http::{FetchOptions, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`Fetcher`] answering from a fixed script of URLs.
///
/// Unscripted GETs fail with an HTTP error; unscripted existence checks
/// answer `false`. Every call is recorded as `"GET <url>"` or `"HEAD <url>"`.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, Result<String, String>>,
    probes: HashMap<String, Result<bool, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_owned(), Ok(body.to_owned()));
        self
    }

    pub fn with_get_error(mut self, url: &str, message: &str) -> Self {
        self.pages.insert(url.to_owned(), Err(message.to_owned()));
        self
    }

    pub fn with_probe(mut self, url: &str, exists: bool) -> Self {
        self.probes.insert(url.to_owned(), Ok(exists));
        self
    }

    pub fn with_probe_error(mut self, url: &str, message: &str) -> Self {
        self.probes.insert(url.to_owned(), Err(message.to_owned()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, entry: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(entry);
        }
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get(&self, url: &str, _options: &FetchOptions) -> Result<String, LookupError> {
        self.record(format!("GET {url}"));
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(LookupError::Http(message.clone())),
            None => Err(LookupError::Http(format!("bad status: 404 for {url}"))),
        }
    }

    async fn exists(&self, url: &str, _options: &FetchOptions) -> Result<bool, LookupError> {
        self.record(format!("HEAD {url}"));
        match self.probes.get(url) {
            Some(Ok(found)) => Ok(*found),
            Some(Err(message)) => Err(LookupError::Http(message.clone())),
            None => Ok(false),
        }
    }
}

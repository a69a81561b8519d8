//! JSON HTTP front end for name lookups.
//!
//! ## Endpoints
//!
//! - `GET /api/search?name=<text>` resolve a name into a record

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use namesake_lookup::{LookupError, NameRecord, Resolver};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

const MISSING_NAME: &str = "Name parameter is required";
const NOT_FOUND: &str = "No results found for this name";
const FETCH_FAILED: &str = "Failed to fetch name data";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Query string of the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Name to look up.
    #[serde(default)]
    pub name: Option<String>,
}

/// Response envelope shared by every outcome of the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// `true` only when `data` is present.
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-strategy failure notes, on not-found only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    /// Fault text, on internal failure only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SearchResponse {
    fn found(record: NameRecord) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
            debug: None,
            details: None,
        }
    }

    fn failure(error: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_owned()),
            debug: None,
            details: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(handle_search))
        .with_state(state)
}

/// A running lookup server.
///
/// The server task is aborted when this handle is dropped.
pub struct SearchServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl SearchServer {
    /// Bind `config.host:config.port` and serve the router in a background
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Server`] if the listener cannot be bound.
    pub async fn start(resolver: Arc<Resolver>, config: &ServiceConfig) -> Result<Self> {
        let app = router(AppState { resolver });

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Server(format!("failed to get local addr: {e}")))?;

        info!("namesake listening on http://{addr}/api/search");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("namesake server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for SearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn handle_search(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> (StatusCode, Json<SearchResponse>) {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "malformed query string");
            let body = SearchResponse {
                details: Some(rejection.body_text()),
                ..SearchResponse::failure(MISSING_NAME)
            };
            return (StatusCode::BAD_REQUEST, Json(body));
        }
    };

    let name = params.name.unwrap_or_default();
    let resolver = Arc::clone(&state.resolver);
    // a panic inside the pipeline surfaces as a JoinError
    let (status, body) = match tokio::spawn(async move { resolver.resolve(&name).await }).await {
        Ok(outcome) => respond(outcome),
        Err(e) => internal(format!("lookup task failed: {e}")),
    };
    (status, Json(body))
}

/// Map a lookup outcome to its status code and envelope.
fn respond(outcome: std::result::Result<NameRecord, LookupError>) -> (StatusCode, SearchResponse) {
    match outcome {
        Ok(record) => {
            tracing::debug!(name = %record.name, "lookup succeeded");
            (StatusCode::OK, SearchResponse::found(record))
        }
        Err(LookupError::MissingParameter(_)) => {
            (StatusCode::BAD_REQUEST, SearchResponse::failure(MISSING_NAME))
        }
        Err(LookupError::NotFound(diagnostics)) => {
            info!(%diagnostics, "no results");
            let body = SearchResponse {
                debug: Some(diagnostics),
                ..SearchResponse::failure(NOT_FOUND)
            };
            (StatusCode::NOT_FOUND, body)
        }
        Err(e) => internal(e.to_string()),
    }
}

fn internal(details: String) -> (StatusCode, SearchResponse) {
    tracing::error!(error = %details, "lookup failed");
    let body = SearchResponse {
        details: Some(details),
        ..SearchResponse::failure(FETCH_FAILED)
    };
    (StatusCode::INTERNAL_SERVER_ERROR, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use namesake_lookup::types::{Candidate, Method};
    use namesake_lookup::{Fetcher, HttpFetcher, LookupConfig, NOT_AVAILABLE, Strategy};

    fn record() -> NameRecord {
        NameRecord {
            name: "Emma".into(),
            url: Some("https://origin.test/girl/emma.html".into()),
            gender: "Girl".into(),
            origin: "Germanic".into(),
            religion: NOT_AVAILABLE.into(),
            meaning: "Whole, universal".into(),
            how_to_write: NOT_AVAILABLE.into(),
            syllables: NOT_AVAILABLE.into(),
            lucky_number: "5".into(),
            lucky_color: NOT_AVAILABLE.into(),
            lucky_day: NOT_AVAILABLE.into(),
            lucky_metal: NOT_AVAILABLE.into(),
            lucky_stone: NOT_AVAILABLE.into(),
            similar_names: vec!["Emmy".into()],
        }
    }

    fn json(body: &SearchResponse) -> serde_json::Value {
        serde_json::to_value(body).unwrap_or_default()
    }

    #[test]
    fn success_envelope() {
        let (status, body) = respond(Ok(record()));
        assert_eq!(status, StatusCode::OK);
        let value = json(&body);
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["luckyNumber"], "5");
        assert_eq!(value["data"]["similarNames"][0], "Emmy");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn missing_parameter_is_bad_request() {
        let (status, body) = respond(Err(LookupError::MissingParameter("name".into())));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json(&body),
            serde_json::json!({"success": false, "error": "Name parameter is required"})
        );
    }

    #[test]
    fn not_found_carries_diagnostics() {
        let diagnostics = "structured query: no candidates; listing scan: no candidates";
        let (status, body) = respond(Err(LookupError::NotFound(diagnostics.into())));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json(&body),
            serde_json::json!({
                "success": false,
                "error": "No results found for this name",
                "debug": diagnostics,
            })
        );
    }

    #[test]
    fn other_errors_are_internal() {
        let (status, body) = respond(Err(LookupError::Config("bad base url".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value = json(&body);
        assert_eq!(value["error"], "Failed to fetch name data");
        assert_eq!(value["details"], "config error: bad base url");
        assert!(value.get("data").is_none());
    }

    struct PanickingStrategy;

    #[async_trait]
    impl Strategy for PanickingStrategy {
        async fn attempt(
            &self,
            _query: &str,
            _fetcher: &dyn Fetcher,
            _config: &LookupConfig,
        ) -> std::result::Result<Vec<Candidate>, LookupError> {
            panic!("listing markup changed shape");
        }

        fn method(&self) -> Method {
            Method::ListingScan
        }
    }

    fn state_with(strategies: Vec<Box<dyn Strategy>>) -> AppState {
        let fetcher = Arc::new(HttpFetcher::new().expect("client"));
        let resolver = Resolver::with_strategies(
            fetcher,
            LookupConfig::for_origin("http://127.0.0.1:9"),
            strategies,
        );
        AppState {
            resolver: Arc::new(resolver),
        }
    }

    #[tokio::test]
    async fn panicking_lookup_returns_internal_envelope() {
        let state = state_with(vec![Box::new(PanickingStrategy)]);
        let params = SearchParams {
            name: Some("Emma".into()),
        };

        let (status, Json(body)) = handle_search(State(state), Ok(Query(params))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let value = json(&body);
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Failed to fetch name data");
        assert!(value["details"].as_str().is_some_and(|d| d.contains("panic")));
    }
}

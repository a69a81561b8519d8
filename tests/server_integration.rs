//! End-to-end tests: the real server over TCP, resolving against a
//! `wiremock` origin.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use namesake::{SearchServer, ServiceConfig, build_resolver};
use namesake_lookup::LookupConfig;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAIL_HTML: &str = r#"<html><head><title>Noah - Meaning</title></head><body>
<h1>Noah</h1>
<div class="split-info-row"><span class="split-info-label">Gender</span><span class="split-info-text">Boy</span></div>
<div class="split-info-row"><span class="split-info-label">Origin</span><span class="split-info-text">Hebrew</span></div>
<div class="split-info-row"><span class="split-info-label">Lucky Number</span><span class="split-info-text">7</span></div>
</body></html>"#;

async fn start(origin: &MockServer) -> SearchServer {
    let config = ServiceConfig {
        host: "127.0.0.1".into(),
        port: 0,
        lookup: LookupConfig::for_origin(origin.uri()),
    };
    let resolver = build_resolver(&config).expect("resolver");
    SearchServer::start(resolver, &config).await.expect("server")
}

async fn get(server: &SearchServer, query: &str) -> (u16, Value) {
    let url = format!("http://{}/api/search{query}", server.addr());
    let response = reqwest::get(&url).await.expect("request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn resolves_name_end_to_end() {
    let origin = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(query_param("action", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"name": "Noah", "gender": "Boy", "u_mean": "Rest, comfort"}]
        })))
        .mount(&origin)
        .await;
    Mock::given(method("GET"))
        .and(path("/boy/noah.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_HTML))
        .mount(&origin)
        .await;

    let server = start(&origin).await;
    let (status, body) = get(&server, "?name=Noah").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["name"], "Noah");
    assert_eq!(data["gender"], "Boy");
    assert_eq!(data["origin"], "Hebrew");
    assert_eq!(data["meaning"], "Rest, comfort");
    assert_eq!(data["luckyNumber"], "7");
    assert_eq!(data["luckyStone"], "N/A");
    assert_eq!(data["url"], format!("{}/boy/noah.html", origin.uri()));
    assert!(data["similarNames"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn missing_name_is_bad_request() {
    let origin = MockServer::start().await;
    let server = start(&origin).await;

    for query in ["", "?name=", "?name=%20%20"] {
        let (status, body) = get(&server, query).await;
        assert_eq!(status, 400, "query {query:?}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Name parameter is required");
    }
    assert!(origin.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn malformed_query_gets_json_envelope() {
    let origin = MockServer::start().await;
    let server = start(&origin).await;

    let (status, body) = get(&server, "?name=Emma&name=Emmy").await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Name parameter is required");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert!(body.get("data").is_none());
    assert!(origin.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn unknown_name_is_not_found_with_diagnostics() {
    let origin = MockServer::start().await;
    let server = start(&origin).await;

    let (status, body) = get(&server, "?name=Zzyzx").await;

    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No results found for this name");
    let debug = body["debug"].as_str().expect("debug string");
    assert!(debug.contains("structured query:"));
    assert!(debug.contains("listing scan:"));
    assert!(debug.contains("direct probe:"));
}

#[tokio::test]
async fn server_reports_bound_port() {
    let origin = MockServer::start().await;
    let server = start(&origin).await;
    assert_ne!(server.port(), 0);
    assert_eq!(server.addr().port(), server.port());
    server.shutdown();
}

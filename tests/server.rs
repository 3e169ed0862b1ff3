//! HTTP surface tests against a spawned router and an in-process resolver stub

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use name_forge::server::{router, AppState};
use name_forge::{DnsChecker, PipelineConfig};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

/// Serve a router on an ephemeral port and return its address
async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Stub DNS-over-HTTPS resolver: `taken.*` has an A record, everything else
/// is NXDOMAIN
async fn resolve(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let name = params.get("name").cloned().unwrap_or_default();
    if name.starts_with("taken") {
        Json(serde_json::json!({
            "Status": 0,
            "Answer": [
                { "name": name, "type": 1, "TTL": 300, "data": "93.184.216.34" }
            ]
        }))
    } else {
        Json(serde_json::json!({ "Status": 3 }))
    }
}

async fn spawn_app() -> SocketAddr {
    let resolver_addr = spawn(Router::new().route("/resolve", get(resolve))).await;
    let state = AppState {
        checker: Arc::new(DnsChecker::with_resolver(format!(
            "http://{}/resolve",
            resolver_addr
        ))),
        pipeline_config: PipelineConfig::default(),
    };
    spawn(router(state)).await
}

#[tokio::test]
async fn health_endpoint_responds() {
    let addr = spawn_app().await;
    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn check_domain_normalizes_and_reports_available() {
    let addr = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/check-domain", addr))
        .json(&serde_json::json!({ "domain": "openai" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "domain": "openai.com", "available": true, "status": 3 })
    );
}

#[tokio::test]
async fn check_domain_reports_taken_domains() {
    let addr = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/check-domain", addr))
        .json(&serde_json::json!({ "domain": " Taken Name " }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["domain"], "takenname.com");
    assert_eq!(body["available"], false);
    assert_eq!(body["status"], 0);
}

#[tokio::test]
async fn check_domain_requires_a_domain() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    for body in [serde_json::json!({}), serde_json::json!({ "domain": "  " })] {
        let response = client
            .post(format!("http://{}/api/check-domain", addr))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Domain is required");
    }
}

#[tokio::test]
async fn check_domain_resolver_failure_is_a_500() {
    // Point the checker at a port nothing listens on
    let state = AppState {
        checker: Arc::new(DnsChecker::with_resolver("http://127.0.0.1:1/resolve")),
        pipeline_config: PipelineConfig::default(),
    };
    let addr = spawn(router(state)).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/check-domain", addr))
        .json(&serde_json::json!({ "domain": "anything" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to check domain availability");
}

#[tokio::test]
async fn generate_names_requires_industry_and_keywords() {
    let addr = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/generate-names", addr))
        .json(&serde_json::json!({ "keywords": "fast payments" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Industry and keywords are required");
}

#[tokio::test]
async fn generate_names_requires_provider_credentials() {
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("GEMINI_API_KEY");

    let addr = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/generate-names", addr))
        .json(&serde_json::json!({ "industry": "tech", "keywords": "fast payments" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "API keys for OpenAI and Gemini are required.");
}

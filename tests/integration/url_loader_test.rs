// tests/integration/url_loader_test.rs

//! Integration tests for loading documents over HTTP.

use super::fixtures;
use super::test_helpers::TestServer;
use jsontraverse::core::loader::load_from_url;
use jsontraverse::core::{HttpOptions, JsonTraverse, Source, TraverseError, TraverseOptions};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_load_from_url_valid_document() {
    let server = TestServer::start().await;
    let value = load_from_url(&server.url("/inventory.json"), &HttpOptions::default())
        .await
        .unwrap();
    assert_eq!(value, fixtures::inventory());
}

#[tokio::test]
async fn test_load_from_url_invalid_body() {
    let server = TestServer::start().await;
    let err = load_from_url(&server.url("/broken.json"), &HttpOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TraverseError::Parse(_)));
}

#[tokio::test]
async fn test_load_from_url_not_found() {
    let server = TestServer::start().await;
    let err = load_from_url(&server.url("/missing.json"), &HttpOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TraverseError::HttpClientError(_)));
    assert!(format!("{:?}", err).contains("404"));
}

#[tokio::test]
async fn test_load_from_url_error_status_with_json_body() {
    let server = TestServer::start().await;
    let err = load_from_url(&server.url("/teapot"), &HttpOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TraverseError::HttpClientError(_)));
    assert!(format!("{:?}", err).contains("418"));
}

#[tokio::test]
async fn test_load_from_url_sends_configured_headers() {
    let server = TestServer::start().await;
    let mut http = HttpOptions {
        timeout: Duration::from_secs(5),
        user_agent: "traverse-tests/0.1".to_string(),
        ..HttpOptions::default()
    };
    http.headers.insert("X-Token".to_string(), "s3cret".to_string());

    let value = load_from_url(&server.url("/echo-headers"), &http)
        .await
        .unwrap();
    assert_eq!(
        value,
        json!({"x-token": "s3cret", "user-agent": "traverse-tests/0.1"})
    );
}

#[tokio::test]
async fn test_session_from_url() {
    let server = TestServer::start().await;
    let session = JsonTraverse::from_url(
        &server.url("/inventory.json"),
        TraverseOptions::default(),
        &HttpOptions::default(),
    )
    .await
    .unwrap();

    let found = session.traverse_named("store/books/:/title").unwrap();
    let titles: Vec<(&str, &str)> = found
        .iter()
        .map(|(path, value)| (path.as_str(), value.as_str().unwrap()))
        .collect();
    assert_eq!(
        titles,
        vec![
            ("store/books/0/title", "Dune"),
            ("store/books/1/title", "Emma"),
            ("store/books/2/title", "Neuromancer"),
        ]
    );
}

#[tokio::test]
async fn test_session_load_from_url_source() {
    let server = TestServer::start().await;
    let source = Source::from_arg(&server.url("/inventory.json"));
    let session = JsonTraverse::load(source, TraverseOptions::default(), &HttpOptions::default())
        .await
        .unwrap();
    assert_eq!(
        session.traverse_values("store/bicycle/color").unwrap(),
        vec![&json!("red")]
    );
}

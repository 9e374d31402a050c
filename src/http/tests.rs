//! Tests for the HTTP page fetcher

use super::*;
use crate::pagination::PageFetcher;
use crate::types::{Envelope, FetchRequest, FetchResult, LOAD_MORE_ACTION};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(page: u32) -> FetchRequest {
    FetchRequest::new("tok", page)
}

#[test]
fn test_fetch_client_rejects_invalid_endpoint() {
    assert!(FetchClient::new("not a url").is_err());
}

#[test]
fn test_fetch_client_config_default() {
    let config = FetchClientConfig::default();
    assert_eq!(config.timeout, std::time::Duration::from_secs(30));
    assert!(config.user_agent.starts_with("loadmore/"));
}

#[tokio::test]
async fn test_success_envelope_becomes_fragment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/load-more"))
        .and(body_partial_json(serde_json::json!({
            "action": LOAD_MORE_ACTION,
            "nonce": "tok",
            "page": 2,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(Envelope::html("<article/>")))
        .mount(&mock_server)
        .await;

    let client = FetchClient::new(&format!("{}/load-more", mock_server.uri())).unwrap();
    let result = client.send(&request(2)).await.unwrap();

    assert_eq!(
        result,
        FetchResult::Success {
            html: "<article/>".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_envelope_on_200_is_end_of_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(Envelope::message("No more posts found.")),
        )
        .mount(&mock_server)
        .await;

    let client = FetchClient::new(&mock_server.uri()).unwrap();
    let result = client.send(&request(4)).await.unwrap();

    assert_eq!(
        result,
        FetchResult::Empty {
            message: "No more posts found.".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_envelope_on_403_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(Envelope::message("Security check failed.")),
        )
        .mount(&mock_server)
        .await;

    let client = FetchClient::new(&mock_server.uri()).unwrap();
    let result = client.send(&request(2)).await.unwrap();

    assert_eq!(
        result,
        FetchResult::Failure {
            reason: "Security check failed.".to_string()
        }
    );
}

#[tokio::test]
async fn test_unparseable_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = FetchClient::new(&mock_server.uri()).unwrap();
    let err = client.send(&request(2)).await.unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fetcher_folds_errors_into_failure() {
    // Unbound port: the connection itself fails
    let client = FetchClient::new("http://127.0.0.1:1/load-more").unwrap();
    let result = client.fetch(request(2)).await;

    assert!(result.is_failure());
}

#[tokio::test]
async fn test_error_envelope_without_message_gets_status_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"success": false, "data": {}})),
        )
        .mount(&mock_server)
        .await;

    let client = FetchClient::new(&mock_server.uri()).unwrap();
    let result = client.send(&request(2)).await.unwrap();

    match result {
        FetchResult::Failure { reason } => assert!(reason.contains("500")),
        other => panic!("expected failure, got {other:?}"),
    }
}

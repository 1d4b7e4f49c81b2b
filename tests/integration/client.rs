//! Client behaviour observed through the public API.

use super::common::*;
use mimecast_connector::api::MimecastApiClient;
use mimecast_connector::client::{ErrorKind, RetryConfig};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> MimecastApiClient {
    MimecastApiClient::with_config(credentials(), config(server)).unwrap()
}

#[tokio::test]
async fn test_requests_are_signed_for_the_app() {
    let server = MockServer::start().await;
    let auth_headers = Arc::new(Mutex::new(Vec::new()));
    let seen = auth_headers.clone();

    Mock::given(method("POST"))
        .and(path(DOMAINS_PATH))
        .and(header("x-mc-app-id", "integration-app-id"))
        .respond_with(move |req: &wiremock::Request| {
            let value = req
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            seen.lock().unwrap().push(value);
            ResponseTemplate::new(200).set_body_json(envelope(json!([])))
        })
        .expect(2)
        .mount(&server)
        .await;

    let client = api(&server);
    client.get_domains().await.unwrap();
    client.get_domains().await.unwrap();

    let headers = auth_headers.lock().unwrap();
    assert!(headers.iter().all(|h| h.starts_with("MC integration-client:")));
    assert_ne!(headers[0], headers[1]);
}

#[tokio::test]
async fn test_developer_key_defect_is_recovered() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    Mock::given(method("POST"))
        .and(path(ACCOUNT_PATH))
        .respond_with(move |_: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(200).set_body_json(json!({
                    "meta": { "status": 200 },
                    "data": [],
                    "fail": [{ "errors": [{ "code": "err_developer_key_not_found", "message": "Developer key not found", "retryable": false }] }]
                }))
            } else {
                ResponseTemplate::new(200)
                    .set_body_json(envelope(json!([{ "mimecastId": "01-0101-00001" }])))
            }
        })
        .mount(&server)
        .await;

    let account = api(&server).get_account().await.unwrap();
    assert_eq!(account.mimecast_id, "01-0101-00001");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_transport_retries_then_succeeds() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    Mock::given(method("POST"))
        .and(path(DOMAINS_PATH))
        .respond_with(move |_: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(429)
            } else {
                ResponseTemplate::new(200).set_body_json(envelope(json!([
                    { "id": "dom-1", "domain": "acme.com" }
                ])))
            }
        })
        .mount(&server)
        .await;

    let config = mimecast_connector::client::ClientConfig::builder()
        .with_base_url(server.uri())
        .with_retry(
            RetryConfig::default()
                .with_max_attempts(2)
                .with_initial_delay(Duration::from_millis(5)),
        )
        .build();
    let client = MimecastApiClient::with_config(credentials(), config).unwrap();

    let domains = client.get_domains().await.unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_repeated_cursor_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(USER_DATA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "status": 200, "pagination": { "next": "same" } },
            "data": []
        })))
        .expect(2)
        .mount(&server)
        .await;

    let err = api(&server)
        .get_awareness_campaign_user_data("camp-1")
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::RepeatedCursor { .. }));
}

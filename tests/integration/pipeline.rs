//! Full collection runs.

use super::common::*;
use mimecast_connector::auth::Credentials;
use mimecast_connector::collect;
use mimecast_connector::graph::JobState;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_full_collection() {
    let server = mock_provider().await;

    let collection = collect(credentials(), config(&server))
        .await
        .expect("collection should succeed");
    assert!(collection.is_success());

    let summary = collection.summary().await;
    assert!(summary.steps.iter().all(|s| s.status == "success"));
    assert_eq!(summary.steps.len(), 5);

    assert_eq!(summary.entities["mimecast_account"], 1);
    assert_eq!(summary.entities["mimecast_domain"], 2);
    assert_eq!(summary.entities["mimecast_user"], 3);
    assert_eq!(summary.entities["mimecast_awareness_campaign"], 1);

    assert_eq!(summary.relationships["mimecast_account_has_domain"], 2);
    assert_eq!(summary.relationships["mimecast_domain_has_user"], 3);
    assert_eq!(summary.relationships["mimecast_account_has_awareness_campaign"], 1);
    assert_eq!(summary.relationships["mimecast_user_completed_awareness_campaign"], 1);
    assert_eq!(summary.relationships["mimecast_user_assigned_awareness_campaign"], 1);

    let alice = collection
        .state
        .find_entity("alice@acme.com")
        .await
        .unwrap()
        .expect("alice should be collected");
    assert_eq!(alice.property("emailDomain"), Some(&json!(["acme.com"])));

    let campaign = collection
        .state
        .find_entity("camp-1")
        .await
        .unwrap()
        .expect("campaign should be collected");
    assert!(campaign.raw().unwrap().get("emailMsg").is_none());
}

#[tokio::test]
async fn test_summary_serializes() {
    let server = mock_provider().await;
    let collection = collect(credentials(), config(&server)).await.unwrap();

    let value = serde_json::to_value(collection.summary().await).unwrap();
    assert_eq!(value["steps"][0]["id"], "fetch-account");
    assert_eq!(value["steps"][0]["status"], "success");
    assert!(value["steps"][0].get("error").is_none());
    assert_eq!(value["entities"]["mimecast_user"], 3);
}

#[tokio::test]
async fn test_failed_step_skips_dependents() {
    let server = MockServer::start().await;
    mount(
        &server,
        ACCOUNT_PATH,
        envelope(json!([{ "mimecastId": "01-0101-00001", "accountName": "Acme Corp" }])),
    )
    .await;
    mount(&server, CAMPAIGNS_PATH, envelope(json!([]))).await;
    Mock::given(method("POST"))
        .and(path(DOMAINS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "status": 500 }, "data": []
        })))
        .mount(&server)
        .await;

    let collection = collect(credentials(), config(&server)).await.unwrap();
    assert!(!collection.is_success());

    let summary = collection.summary().await;
    let status: Vec<_> = summary.steps.iter().map(|s| (s.id, s.status)).collect();
    assert_eq!(
        status,
        vec![
            ("fetch-account", "success"),
            ("fetch-domains", "failure"),
            ("fetch-users", "skipped"),
            ("fetch-awareness-campaigns", "success"),
            ("fetch-awareness-campaigns-enrollment", "skipped"),
        ]
    );
    assert!(summary.steps[1]
        .error
        .as_deref()
        .is_some_and(|e| e.contains("500")));
}

#[tokio::test]
async fn test_rejected_credentials_stop_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = collect(credentials(), config(&server)).await.unwrap_err();
    assert!(err.is_auth_error());
    let msg = err.to_string();
    assert!(msg.contains("401"));
    assert!(msg.contains(ACCOUNT_PATH));
}

#[tokio::test]
async fn test_incomplete_credentials_stop_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let incomplete = Credentials::new("integration-client", "c2VjcmV0LXNpZ25pbmcta2V5", "", "");
    let err = collect(incomplete, config(&server)).await.unwrap_err();
    assert!(err.to_string().contains("appKey"));
}

use mimecast_connector::auth::Credentials;
use mimecast_connector::client::ClientConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT_PATH: &str = "/api/account/get-account";
pub const DOMAINS_PATH: &str = "/api/domain/get-internal-domain";
pub const USERS_PATH: &str = "/api/user/get-internal-users";
pub const CAMPAIGNS_PATH: &str = "/api/awareness-training/campaign/get-campaigns";
pub const USER_DATA_PATH: &str = "/api/awareness-training/campaign/get-user-data";

pub fn credentials() -> Credentials {
    Credentials::new(
        "integration-client",
        "c2VjcmV0LXNpZ25pbmcta2V5",
        "integration-app-key",
        "integration-app-id",
    )
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .with_base_url(server.uri())
        .without_retry()
        .build()
}

pub fn envelope(data: Value) -> Value {
    json!({ "meta": { "status": 200 }, "data": data })
}

pub async fn mount(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A provider with one account, two domains, three users and one campaign.
pub async fn mock_provider() -> MockServer {
    let server = MockServer::start().await;

    mount(
        &server,
        ACCOUNT_PATH,
        envelope(json!([{
            "mimecastId": "01-0101-00001",
            "accountName": "Acme Corp",
            "accountCode": "CUSA1",
            "region": "us",
            "packages": ["Secure Email Gateway"]
        }])),
    )
    .await;

    mount(
        &server,
        DOMAINS_PATH,
        envelope(json!([
            { "id": "dom-1", "domain": "acme.com", "sendOnly": false, "local": true, "inboundType": "normal" },
            { "id": "dom-2", "domain": "acme.org", "sendOnly": true, "local": false, "inboundType": "normal" }
        ])),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(USERS_PATH))
        .respond_with(|req: &wiremock::Request| {
            let body: Value = serde_json::from_slice(&req.body).unwrap_or_default();
            let users = match body["data"][0]["domain"].as_str() {
                Some("acme.com") => json!([
                    { "emailAddress": "alice@acme.com", "name": "Alice", "domain": "acme.com", "alias": false, "addressType": "internal", "source": "cloud" },
                    { "emailAddress": "bob@acme.com", "name": "Bob", "domain": "acme.com", "alias": false, "addressType": "internal", "source": "cloud" }
                ]),
                Some("acme.org") => json!([
                    { "emailAddress": "carol@acme.org", "name": "Carol", "domain": "acme.org", "alias": true }
                ]),
                _ => json!([]),
            };
            ResponseTemplate::new(200).set_body_json(envelope(json!([{ "users": users }])))
        })
        .mount(&server)
        .await;

    mount(
        &server,
        CAMPAIGNS_PATH,
        envelope(json!([{
            "id": "camp-1",
            "name": "Phishing Basics",
            "locked": false,
            "launchDate": "2026-09-01T00:00:00+0000",
            "numSent": 3,
            "numCompleted": 1,
            "emailMsg": { "subject": "Your training", "body": "..." }
        }])),
    )
    .await;

    mount(
        &server,
        USER_DATA_PATH,
        envelope(json!([
            { "email": "alice@acme.com", "name": "Alice", "results": { "question1": "CORRECT", "question2": "CORRECT" } },
            { "email": "bob@acme.com", "name": "Bob", "results": { "question1": "SENT" } },
            { "email": "departed@acme.com", "name": "Gone", "results": {} }
        ])),
    )
    .await;

    server
}

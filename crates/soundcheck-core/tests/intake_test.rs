#![allow(clippy::unwrap_used)]
// Integration tests for the public contact-intake path.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use soundcheck_api::RowsClient;
use soundcheck_core::{ContactDraft, CoreError, EventType, submit_contact};

async fn setup() -> (MockServer, RowsClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RowsClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn draft() -> ContactDraft {
    ContactDraft {
        name: "Leilani K.".into(),
        email: "leilani@example.com".into(),
        phone: None,
        event_type: EventType::Wedding,
        event_date: Some("2026-10-03".into()),
        message: "Beach ceremony, ~80 guests.".into(),
    }
}

#[tokio::test]
async fn complete_submission_persists_and_returns_stable_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_submissions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "0c4f2f6e-9a1f-4e8c-9f51-0b6f6f4a2d11",
            "name": "Leilani K.",
            "email": "leilani@example.com",
            "phone": null,
            "event_type": "wedding",
            "event_date": "2026-10-03",
            "message": "Beach ceremony, ~80 guests.",
            "created_at": "2026-08-01T20:14:00Z"
        }])))
        .mount(&server)
        .await;

    let stored = submit_contact(&client, &draft()).await.unwrap();

    assert_eq!(stored.id.to_string(), "0c4f2f6e-9a1f-4e8c-9f51-0b6f6f4a2d11");
    assert_eq!(stored.event_type, EventType::Wedding);
}

#[tokio::test]
async fn missing_name_rejected_before_calling_the_store() {
    let (server, client) = setup().await;

    let mut d = draft();
    d.name = String::new();

    let err = submit_contact(&client, &d).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

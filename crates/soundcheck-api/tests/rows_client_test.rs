#![allow(clippy::unwrap_used)]
// Integration tests for `RowsClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use soundcheck_api::rows::models::{NewContactRow, NewMixRow, NewPhotoRow};
use soundcheck_api::{Error, RowsClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RowsClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RowsClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Photo tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_photos_ordered() {
    let (server, client) = setup().await;

    let rows = json!([
        { "id": 7, "url": "https://cdn.example/one.jpg", "alt": "Sunset set", "display_order": 0 },
        { "id": 3, "url": "https://cdn.example/two.jpg", "alt": "Crowd", "display_order": 1 }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .and(query_param("order", "display_order.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&rows))
        .mount(&server)
        .await;

    let photos = client.list_photos().await.unwrap();

    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].id, 7);
    assert_eq!(photos[0].alt.as_deref(), Some("Sunset set"));
    assert_eq!(photos[1].display_order, 1);
}

#[tokio::test]
async fn test_insert_photo_returns_representation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": 42, "url": "https://cdn.example/new.jpg", "alt": "New", "display_order": 5 }
        ])))
        .mount(&server)
        .await;

    let photo = client
        .insert_photo(&NewPhotoRow {
            url: "https://cdn.example/new.jpg".into(),
            alt: "New".into(),
            display_order: 5,
        })
        .await
        .unwrap();

    assert_eq!(photo.id, 42);
    assert_eq!(photo.display_order, 5);
}

#[tokio::test]
async fn test_max_photo_order_empty_gallery() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.max_photo_order().await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_photo() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/photos"))
        .and(query_param("id", "eq.42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_photo(42).await.unwrap();
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_structured_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "column \"platfrm\" does not exist",
            "code": "42703",
            "hint": "Perhaps you meant \"platform\""
        })))
        .mount(&server)
        .await;

    let result = client.list_mixes().await;
    match result {
        Err(Error::Api { message, code, status }) => {
            assert!(message.contains("does not exist"));
            assert!(message.contains("Perhaps you meant"));
            assert_eq!(code.as_deref(), Some("42703"));
            assert_eq!(status, 400);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let result = client.delete_mix(1).await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

// ── Mix round-trip ──────────────────────────────────────────────────

#[tokio::test]
async fn test_insert_mix_then_list() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 9,
            "title": "Sunset Sessions Vol. 2",
            "embed_url": "https://open.spotify.com/playlist/xyz",
            "platform": "spotify",
            "description": null,
            "display_order": 0
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "title": "Sunset Sessions Vol. 2",
            "embed_url": "https://open.spotify.com/playlist/xyz",
            "platform": "spotify",
            "description": null,
            "display_order": 0
        }])))
        .mount(&server)
        .await;

    let inserted = client
        .insert_mix(&NewMixRow {
            title: "Sunset Sessions Vol. 2".into(),
            embed_url: "https://open.spotify.com/playlist/xyz".into(),
            platform: "spotify".into(),
            description: None,
            display_order: 0,
        })
        .await
        .unwrap();
    assert_eq!(inserted.id, 9);

    let mixes = client.list_mixes().await.unwrap();
    assert_eq!(mixes.len(), 1);
    assert_eq!(mixes[0].embed_url, "https://open.spotify.com/playlist/xyz");
}

// ── Contact tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_insert_contact_returns_id_and_timestamp() {
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

    let stored = client
        .insert_contact(&NewContactRow {
            name: "Leilani K.".into(),
            email: "leilani@example.com".into(),
            phone: None,
            event_type: "wedding".into(),
            event_date: Some("2026-10-03".into()),
            message: "Beach ceremony, ~80 guests.".into(),
        })
        .await
        .unwrap();

    assert_eq!(stored.name, "Leilani K.");
    assert_eq!(stored.id.to_string(), "0c4f2f6e-9a1f-4e8c-9f51-0b6f6f4a2d11");
}

// ── Featured video tests ────────────────────────────────────────────

#[tokio::test]
async fn test_active_video_absent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/featured_videos"))
        .and(query_param("is_active", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.active_video().await.unwrap().is_none());
}

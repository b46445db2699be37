#![allow(clippy::unwrap_used)]
// Integration tests for `ContentEditor` using wiremock.
//
// The interesting properties here are about *when* the network is
// touched: validation failures and delete requests must issue nothing,
// reorder must persist a contiguous order, and a failed reorder must
// roll back to the server's order.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use soundcheck_api::{RowsClient, StorageClient};
use soundcheck_core::store::{ContentAction, ContentSnapshot};
use soundcheck_core::{
    ContentEditor, CoreError, DeleteKind, EntityId, Mix, NewMix, Photo, PhotoUpload, Platform,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ContentEditor) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let rows = RowsClient::with_client(reqwest::Client::new(), base_url.clone());
    let storage = StorageClient::with_client(reqwest::Client::new(), base_url);
    (server, ContentEditor::new(rows, storage))
}

fn photo(id: i64, order: i64) -> Photo {
    Photo {
        id: EntityId::from(id),
        url: format!("https://cdn.example/storage/v1/object/public/photos/{id}.jpg"),
        alt: format!("photo {id}"),
        display_order: order,
    }
}

fn gallery(n: i64) -> ContentSnapshot {
    ContentSnapshot {
        photos: (0..n).map(|i| photo(i + 10, i)).collect(),
        ..ContentSnapshot::default()
    }
}

fn photo_row_json(id: i64, order: i64) -> serde_json::Value {
    json!({
        "id": id,
        "url": format!("https://cdn.example/storage/v1/object/public/photos/{id}.jpg"),
        "alt": format!("photo {id}"),
        "display_order": order
    })
}

fn jpeg_upload(size: usize, alt: &str) -> PhotoUpload {
    PhotoUpload {
        file_name: "dawn.jpg".into(),
        bytes: vec![0; size],
        content_type: "image/jpeg".into(),
        alt: alt.into(),
    }
}

// ── Collection cap ──────────────────────────────────────────────────

#[tokio::test]
async fn thirteenth_photo_rejected_before_any_network_call() {
    let (server, editor) = setup().await;
    editor.store().replace(gallery(12));

    let err = editor.upload_photo(jpeg_upload(1024, "one too many")).await.unwrap_err();
    assert!(matches!(err, CoreError::CollectionFull { cap: 12, .. }));

    // The gallery stays at 12 and the backend never heard from us.
    assert_eq!(editor.snapshot().photos.len(), 12);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Upload validation ───────────────────────────────────────────────

#[tokio::test]
async fn oversize_upload_rejected_without_network() {
    let (server, editor) = setup().await;

    let err = editor
        .upload_photo(jpeg_upload(6 * 1024 * 1024, "too big"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn valid_jpeg_upload_persists_url_into_snapshot() {
    let (server, editor) = setup().await;

    // Storage accepts the object.
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/photos/.+-dawn\.jpg$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "photos/x" })))
        .mount(&server)
        .await;

    // Max-order probe sees an empty gallery.
    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .and(query_param("order", "display_order.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    // Row insert returns the representation.
    Mock::given(method("POST"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([photo_row_json(1, 0)])))
        .mount(&server)
        .await;

    // Post-mutation re-fetch replaces the slice.
    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .and(query_param("order", "display_order.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([photo_row_json(1, 0)])))
        .mount(&server)
        .await;

    let uploaded = editor.upload_photo(jpeg_upload(1024 * 1024, "Sunset set")).await.unwrap();
    assert!(uploaded.url.contains("/storage/v1/object/public/photos/"));

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.photos.len(), 1);
    assert_eq!(snapshot.photos[0].id.to_string(), "1");
}

#[tokio::test]
async fn failed_row_insert_removes_orphaned_object() {
    let (server, editor) = setup().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/photos/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "photos/x" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "row insert failed" })))
        .mount(&server)
        .await;

    // Compensating removal of the freshly uploaded object.
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = editor.upload_photo(jpeg_upload(1024, "doomed")).await.unwrap_err();
    assert!(matches!(err, CoreError::Backend { .. }));

    let cleanups: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE" && r.url.path() == "/storage/v1/object/photos")
        .collect();
    assert_eq!(cleanups.len(), 1, "expected exactly one compensating removal");
}

// ── Reorder engine ──────────────────────────────────────────────────

#[tokio::test]
async fn reorder_persists_contiguous_display_orders() {
    let (server, editor) = setup().await;
    editor.store().replace(gallery(3)); // ids 10, 11, 12

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    editor.reorder_photos(0, 2).await.unwrap();

    // Optimistic order applied: 11, 12, 10.
    let ids: Vec<String> = editor.snapshot().photos.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, ["11", "12", "10"]);

    // Every photo got a fresh contiguous order, keyed by id.
    let mut writes: Vec<(String, i64)> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "PATCH")
        .map(|r| {
            let id = r
                .url
                .query_pairs()
                .find(|(k, _)| k == "id")
                .map(|(_, v)| v.into_owned())
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            (id, body["display_order"].as_i64().unwrap())
        })
        .collect();
    writes.sort_by_key(|(_, order)| *order);

    assert_eq!(
        writes,
        vec![
            ("eq.11".to_owned(), 0),
            ("eq.12".to_owned(), 1),
            ("eq.10".to_owned(), 2),
        ]
    );
}

#[tokio::test]
async fn failed_reorder_rolls_back_to_server_order() {
    let (server, editor) = setup().await;
    editor.store().replace(gallery(3));

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/photos"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "write refused" })))
        .mount(&server)
        .await;

    // Authoritative order comes back on the rollback re-fetch.
    Mock::given(method("GET"))
        .and(path("/rest/v1/photos"))
        .and(query_param("order", "display_order.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            photo_row_json(10, 0),
            photo_row_json(11, 1),
            photo_row_json(12, 2),
        ])))
        .mount(&server)
        .await;

    let err = editor.reorder_photos(0, 2).await.unwrap_err();
    assert!(matches!(err, CoreError::Backend { .. }));

    // The optimistic move was discarded, not merged.
    let ids: Vec<String> = editor.snapshot().photos.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, ["10", "11", "12"]);
}

#[tokio::test]
async fn reorder_out_of_range_is_rejected_locally() {
    let (server, editor) = setup().await;
    editor.store().replace(gallery(3));

    let err = editor.reorder_photos(0, 7).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Two-step delete ─────────────────────────────────────────────────

#[tokio::test]
async fn delete_request_alone_never_touches_the_store() {
    let (server, mut editor) = setup().await;
    let mix = Mix {
        id: EntityId::from(5),
        title: "Reception Mix".into(),
        embed_url: "https://www.mixcloud.com/discover/wedding/".into(),
        platform: Platform::Mixcloud,
        description: None,
    };
    editor
        .store()
        .apply(ContentAction::ReplaceMixes(vec![mix.clone()]));

    editor.request_delete(DeleteKind::Mix, mix.id.clone()).unwrap();

    assert!(editor.pending_delete().is_some());
    assert_eq!(editor.snapshot().mixes.len(), 1);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn confirm_delete_executes_and_refreshes() {
    let (server, mut editor) = setup().await;
    let mix = Mix {
        id: EntityId::from(5),
        title: "Reception Mix".into(),
        embed_url: "https://www.mixcloud.com/discover/wedding/".into(),
        platform: Platform::Mixcloud,
        description: None,
    };
    editor
        .store()
        .apply(ContentAction::ReplaceMixes(vec![mix.clone()]));

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/mixes"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    editor.request_delete(DeleteKind::Mix, mix.id).unwrap();
    editor.confirm_delete().await.unwrap();

    assert!(editor.pending_delete().is_none());
    assert!(editor.snapshot().mixes.is_empty());
}

#[tokio::test]
async fn cancel_delete_clears_pending_state() {
    let (_server, mut editor) = setup().await;
    editor.store().apply(ContentAction::ReplaceMixes(vec![Mix {
        id: EntityId::from(5),
        title: "T".into(),
        embed_url: "https://example.com".into(),
        platform: Platform::Spotify,
        description: None,
    }]));

    editor.request_delete(DeleteKind::Mix, EntityId::from(5)).unwrap();
    assert!(editor.cancel_delete().is_some());
    assert!(editor.pending_delete().is_none());

    let err = editor.confirm_delete().await.unwrap_err();
    assert!(matches!(err, CoreError::NoPendingDelete));
}

// ── Mix round-trip ──────────────────────────────────────────────────

#[tokio::test]
async fn add_mix_round_trips_with_server_assigned_id() {
    let (server, editor) = setup().await;

    let mix_json = json!({
        "id": 9,
        "title": "Tropical House Sunset Mix",
        "embed_url": "https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6",
        "platform": "spotify",
        "description": "Perfect beach vibes",
        "display_order": 0
    });

    Mock::given(method("POST"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([mix_json])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/mixes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([mix_json])))
        .mount(&server)
        .await;

    let added = editor
        .add_mix(NewMix {
            title: "Tropical House Sunset Mix".into(),
            embed_url: "https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6".into(),
            platform: Platform::Spotify,
            description: Some("Perfect beach vibes".into()),
        })
        .await
        .unwrap();

    assert_eq!(added.id.to_string(), "9");

    let mixes = editor.snapshot().mixes;
    assert_eq!(mixes.len(), 1);
    assert_eq!(mixes[0].embed_url, "https://open.spotify.com/playlist/37i9dQZF1DX8NTLI2TtZa6");
    assert_eq!(mixes[0].platform, Platform::Spotify);
}

#[tokio::test]
async fn add_mix_missing_title_is_rejected_locally() {
    let (server, editor) = setup().await;

    let err = editor
        .add_mix(NewMix {
            title: String::new(),
            embed_url: "https://open.spotify.com/playlist/x".into(),
            platform: Platform::Spotify,
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#![allow(clippy::unwrap_used)]
// Integration tests for `StorageClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use soundcheck_api::{Error, StorageClient};

async fn setup() -> (MockServer, StorageClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = StorageClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

#[tokio::test]
async fn test_upload_sets_content_type_and_no_upsert() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/photos/abc-dawn.jpg"))
        .and(header("content-type", "image/jpeg"))
        .and(header("x-upsert", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "photos/abc-dawn.jpg" })))
        .mount(&server)
        .await;

    client
        .upload("photos", "abc-dawn.jpg", vec![0xFF, 0xD8, 0xFF], "image/jpeg")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_duplicate_key_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/photos/abc-dawn.jpg"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "The resource already exists"
        })))
        .mount(&server)
        .await;

    let result = client
        .upload("photos", "abc-dawn.jpg", vec![1, 2, 3], "image/jpeg")
        .await;

    match result {
        Err(Error::Storage { message, status }) => {
            assert!(message.contains("already exists"));
            assert_eq!(status, 409);
        }
        other => panic!("expected Storage error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_remove_sends_key_batch() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/photos"))
        .and(body_json(json!({ "prefixes": ["abc-dawn.jpg"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client.remove("photos", &["abc-dawn.jpg".to_owned()]).await.unwrap();
}

#[tokio::test]
async fn test_public_url_shape() {
    let (_server, client) = setup().await;

    let url = client.public_url("photos", "abc-dawn.jpg");
    assert!(url.ends_with("/storage/v1/object/public/photos/abc-dawn.jpg"));
}

//! Workflow helpers for integration tests (upload → get → delete, etc.).

#![allow(dead_code)]

use axum_test::TestServer;
use imgvault_api::MediaIdResponse;

use super::fixtures;

/// Upload `data` under `category` and return the id from the response.
pub async fn upload(client: &TestServer, category: &str, data: Vec<u8>) -> String {
    let response = client
        .post(&format!("/api/v1/{}", category))
        .multipart(fixtures::file_form(data, "photo.png"))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: MediaIdResponse = response.json();
    body.id
}

/// Upload, fetch record and bytes, delete, and verify the image is gone.
pub async fn upload_and_verify_workflow(client: &TestServer, category: &str) -> String {
    let data = fixtures::create_minimal_png();
    let id = upload(client, category, data.clone()).await;

    let get_response = client
        .get(&format!("/api/v1/{}/{}", category, id))
        .await;
    assert_eq!(get_response.status_code(), 200);
    let record: serde_json::Value = get_response.json();
    assert_eq!(record["id"], id);
    assert!(!record["url"].as_str().unwrap_or_default().is_empty());
    assert!(!record["secure_url"].as_str().unwrap_or_default().is_empty());

    let content_response = client
        .get(&format!("/api/v1/{}/{}/content", category, id))
        .await;
    assert_eq!(content_response.status_code(), 200);
    assert_eq!(content_response.as_bytes().as_ref(), data.as_slice());

    let delete_response = client
        .delete(&format!("/api/v1/{}/{}", category, id))
        .await;
    assert_eq!(delete_response.status_code(), 200);

    let verify_response = client
        .get(&format!("/api/v1/{}/{}", category, id))
        .await;
    assert_eq!(verify_response.status_code(), 404);

    id
}

//! Upload, fan-out, lifecycle and signed links.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tokio::sync::mpsc::error::TryRecvError;
use uuid::Uuid;

use crate::helpers::{TestApp, multipart_body, read_json};

const TWO_MIB: usize = 2 * 1024 * 1024;

#[tokio::test]
async fn upload_stores_the_file_and_notifies_every_socket() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    let (first, mut first_rx) = app.state.realtime.connections.register();
    let (_second, mut second_rx) = app.state.realtime.connections.register();

    let report = vec![7u8; TWO_MIB];
    let (status, body) = app.upload(&alice.token, "report.pdf", &report, None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "File uploaded successfully");
    let file = &body["file"];
    assert_eq!(file["name"], "report.pdf");
    assert_eq!(file["owner_id"], alice.id.to_string());
    assert_eq!(file["folder_id"], Value::Null);
    assert_eq!(file["size"], TWO_MIB as u64);
    assert_eq!(file["mime_type"], "application/pdf");
    assert_eq!(app.objects.len(), 1);

    for rx in [&mut first_rx, &mut second_rx] {
        let frame: Value = serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
        assert_eq!(frame["type"], "FILE_CREATED");
        assert_eq!(frame["payload"]["item_id"], file["id"]);
        assert_eq!(frame["payload"]["type"], "file");
        assert_eq!(frame["payload"]["is_starred"], false);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    app.state.realtime.connections.unregister(&first.id);
}

#[tokio::test]
async fn upload_without_a_file_part_is_400() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    let (status, body) = app
        .upload_raw(&alice.token, multipart_body(None, None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No file uploaded.");
}

#[tokio::test]
async fn upload_over_the_limit_is_413() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let limit = app.state.config.server.max_upload_bytes;

    let too_big = vec![0u8; limit + 1];
    let (status, body) = app.upload(&alice.token, "huge.bin", &too_big, None).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
    assert!(app.objects.is_empty());
}

#[tokio::test]
async fn upload_into_a_foreign_folder_is_404() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let bob = app.user("bob@example.com").await;

    let (_, body) = app
        .request(
            Method::POST,
            "/folders",
            Some(json!({"name": "Private"})),
            Some(&alice.token),
        )
        .await;
    let folder_id: Uuid = body["folder"]["id"].as_str().unwrap().parse().unwrap();

    let (status, body) = app
        .upload(&bob.token, "intruder.txt", b"hi", Some(folder_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Folder not found.");
    assert!(app.objects.is_empty());
}

#[tokio::test]
async fn trash_restore_and_purge_a_file() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let (_, body) = app.upload(&alice.token, "notes.txt", b"notes", None).await;
    let uploaded = body["file"].clone();
    let id = uploaded["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(Method::DELETE, &format!("/files/{id}"), None, Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File moved to trash.");

    let (_, trash) = app
        .request(Method::GET, "/trash", None, Some(&alice.token))
        .await;
    assert_eq!(trash["files"][0]["id"], uploaded["id"]);

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/files/{id}/restore"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File restored successfully");
    assert_eq!(body["file"], uploaded);

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/files/{id}/permanent"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File permanently deleted.");
    assert!(app.objects.is_empty());

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/files/{id}/shareable-link"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signed_link_downloads_the_bytes() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let (_, body) = app
        .upload(&alice.token, "hello.txt", b"hello world", None)
        .await;
    let id = body["file"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/files/{id}/shareable-link"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let url = body["signedUrl"].as_str().unwrap();
    let path = url.strip_prefix(&app.base_url).unwrap();
    assert!(path.starts_with("/objects/"));

    let response = app
        .send(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"hello world");

    let response = app
        .send(
            Request::builder()
                .uri("/objects/forged-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let (status, _) = read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn another_user_cannot_touch_my_folder() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let bob = app.user("bob@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/folders",
            Some(json!({"name": "Taxes"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["folder"]["id"].as_str().unwrap().to_string();

    for (method, path) in [
        (Method::DELETE, format!("/folders/{id}")),
        (Method::PATCH, format!("/folders/{id}/restore")),
        (Method::DELETE, format!("/folders/{id}/permanent")),
        (Method::GET, format!("/folders/{id}/breadcrumbs")),
    ] {
        let (status, body) = app.request(method, &path, None, Some(&bob.token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["message"], "Folder not found.");
    }

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/folders/{id}/breadcrumbs"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": id, "name": "Taxes"}]));
}

#[tokio::test]
async fn folder_lifecycle_messages() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    let (status, body) = app
        .request(Method::POST, "/folders", Some(json!({"name": "  "})), Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Folder name is required.");

    let (_, body) = app
        .request(Method::POST, "/folders", Some(json!({"name": "Old"})), Some(&alice.token))
        .await;
    let id = body["folder"]["id"].as_str().unwrap().to_string();
    app.upload(&alice.token, "inside.txt", b"x", Some(id.parse().unwrap()))
        .await;

    let (_, body) = app
        .request(Method::DELETE, &format!("/folders/{id}"), None, Some(&alice.token))
        .await;
    assert_eq!(body["message"], "Folder moved to trash.");

    let (_, body) = app
        .request(
            Method::PATCH,
            &format!("/folders/{id}/restore"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(body["message"], "Folder restored successfully");
    assert_eq!(body["folder"]["is_deleted"], false);

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/folders/{id}/permanent"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Folder permanently deleted.");
    assert!(app.objects.is_empty());
}

#[tokio::test]
async fn malformed_ids_get_json_errors() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    for (method, path) in [
        (Method::DELETE, "/files/not-a-uuid"),
        (Method::PATCH, "/folders/42/restore"),
        (Method::DELETE, "/permissions/nope"),
    ] {
        let (status, body) = app.request(method, path, None, Some(&alice.token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["error"], "VALIDATION", "{path}");
        assert_eq!(body["message"], "Invalid id", "{path}");
    }
}

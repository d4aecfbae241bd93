//! Listings, search, stars and checkout.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

use crate::helpers::{TestApp, read_json};

#[tokio::test]
async fn blank_search_is_rejected() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    for path in ["/search", "/search?q=", "/search?q=%20%20"] {
        let (status, body) = app.request(Method::GET, path, None, Some(&alice.token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["message"], "Search query is required.");
    }
}

#[tokio::test]
async fn browse_lists_the_root_and_rejects_bad_ids() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    app.request(
        Method::POST,
        "/folders",
        Some(json!({"name": "Photos"})),
        Some(&alice.token),
    )
    .await;
    app.upload(&alice.token, "readme.md", b"# hi", None).await;

    for path in ["/browse", "/browse?folderId=", "/browse?folderId=null"] {
        let (status, body) = app.request(Method::GET, path, None, Some(&alice.token)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body["folders"][0]["name"], "Photos");
        assert_eq!(body["folders"][0]["type"], "folder");
        assert_eq!(body["files"][0]["name"], "readme.md");
    }

    let (status, body) = app
        .request(Method::GET, "/browse?folderId=abc", None, Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid folderId");
}

#[tokio::test]
async fn star_then_unstar_leaves_no_star() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let (_, body) = app.upload(&alice.token, "fav.txt", b"fav", None).await;
    let id = body["file"]["id"].clone();

    let (status, star) = app
        .request(
            Method::POST,
            "/stars",
            Some(json!({"resourceId": id, "resourceType": "file"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(star["resource_id"], id);

    let (status, body) = app
        .request(
            Method::POST,
            "/stars",
            Some(json!({"resourceId": id, "resourceType": "file"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Item is already starred.");

    let (_, starred) = app
        .request(Method::GET, "/stars", None, Some(&alice.token))
        .await;
    assert_eq!(starred["files"][0]["id"], id);
    assert_eq!(starred["files"][0]["is_starred"], true);

    let (status, body) = app
        .request(
            Method::DELETE,
            "/stars",
            Some(json!({"resourceId": id})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item unstarred.");

    let (_, starred) = app
        .request(Method::GET, "/stars", None, Some(&alice.token))
        .await;
    assert_eq!(starred, json!({"folders": [], "files": []}));
}

#[tokio::test]
async fn star_requires_both_fields() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    let (status, body) = app
        .request(Method::POST, "/stars", Some(json!({})), Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "resourceId and resourceType are required.");

    let (status, body) = app
        .request(Method::DELETE, "/stars", Some(json!({})), Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "resourceId is required.");
}

#[tokio::test]
async fn recent_lists_my_uploads() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    app.upload(&alice.token, "a.txt", b"a", None).await;

    let (status, body) = app
        .request(Method::GET, "/recent", None, Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "a.txt");
    assert_eq!(body[0]["owner_name"], "alice@example.com");
}

#[tokio::test]
async fn checkout_returns_the_session_url() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    let (status, body) = app
        .request(Method::POST, "/create-checkout-session", None, Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["url"],
        format!("https://checkout.test/session/{}", alice.id)
    );
}

#[tokio::test]
async fn unreadable_bodies_get_json_errors() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/stars",
            Some(json!({"resourceId": "nope", "resourceType": "file"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
    assert_eq!(body["message"], "Invalid request body");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/folders")
        .header(header::AUTHORIZATION, format!("Bearer {}", alice.token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = read_json(app.send(request).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
    assert_eq!(body["message"], "Malformed JSON body");
}

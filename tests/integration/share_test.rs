//! Grants: create, race, list, update, revoke.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::{TestApp, TestUser};

async fn uploaded_file(app: &TestApp, owner: &TestUser) -> String {
    let (_, body) = app.upload(&owner.token, "plan.txt", b"plan", None).await;
    body["file"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn self_share_is_rejected_for_every_role() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let file = uploaded_file(&app, &alice).await;

    for role in ["viewer", "editor"] {
        let (status, body) = app
            .request(
                Method::POST,
                &format!("/files/{file}/share"),
                Some(json!({"email": "ALICE@example.com", "role": role})),
                Some(&alice.token),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "You cannot share a file with yourself.");
    }
}

#[tokio::test]
async fn duplicate_grant_conflicts_and_keeps_the_first() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    app.user("bob@example.com").await;
    let file = uploaded_file(&app, &alice).await;
    let share = format!("/files/{file}/share");

    let (status, body) = app
        .request(
            Method::POST,
            &share,
            Some(json!({"email": "bob@example.com", "role": "viewer"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "File shared successfully");
    assert_eq!(body["permission"]["role"], "viewer");

    let (status, body) = app
        .request(
            Method::POST,
            &share,
            Some(json!({"email": "bob@example.com", "role": "editor"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This file is already shared with the user.");

    let (_, grants) = app
        .request(
            Method::GET,
            &format!("/files/{file}/permissions"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(grants.as_array().unwrap().len(), 1);
    assert_eq!(grants[0]["role"], "viewer");
    assert_eq!(grants[0]["users"]["email"], "bob@example.com");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_grants_produce_one_created_and_one_conflict() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    app.user("bob@example.com").await;
    let file = uploaded_file(&app, &alice).await;
    let share = format!("/files/{file}/share");
    let body = json!({"email": "bob@example.com", "role": "viewer"});

    let (first, second) = tokio::join!(
        app.request(Method::POST, &share, Some(body.clone()), Some(&alice.token)),
        app.request(Method::POST, &share, Some(body.clone()), Some(&alice.token)),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn only_the_owner_manages_grants() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let bob = app.user("bob@example.com").await;
    app.user("carol@example.com").await;
    let file = uploaded_file(&app, &alice).await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/files/{file}/share"),
            Some(json!({"email": "carol@example.com", "role": "viewer"})),
            Some(&bob.token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "File not found or you do not have permission to share it."
    );

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/files/{file}/share"),
            Some(json!({"email": "nobody@example.com", "role": "viewer"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with email nobody@example.com not found.");

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/files/{file}/share"),
            Some(json!({"email": "carol@example.com", "role": "owner"})),
            Some(&alice.token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Valid email and role are required.");
}

#[tokio::test]
async fn update_and_revoke_a_grant() {
    let app = TestApp::new();
    let alice = app.user("alice@example.com").await;
    let bob = app.user("bob@example.com").await;
    let file = uploaded_file(&app, &alice).await;

    let (_, body) = app
        .request(
            Method::POST,
            &format!("/files/{file}/share"),
            Some(json!({"email": "bob@example.com", "role": "viewer"})),
            Some(&alice.token),
        )
        .await;
    let grant = body["permission"]["id"].as_str().unwrap().to_string();
    let path = format!("/permissions/{grant}");

    let (_, shared) = app
        .request(Method::GET, "/shared-with-me", None, Some(&bob.token))
        .await;
    assert_eq!(shared["files"][0]["owner_name"], "alice@example.com");

    let (status, body) = app
        .request(Method::PATCH, &path, Some(json!({"role": "admin"})), Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A valid role is required.");

    let (status, _) = app
        .request(Method::PATCH, &path, Some(json!({"role": "editor"})), Some(&bob.token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .request(Method::PATCH, &path, Some(json!({"role": "editor"})), Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Permission updated successfully");
    assert_eq!(body["permission"]["role"], "editor");

    let (status, body) = app
        .request(Method::DELETE, &path, None, Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Permission removed successfully.");

    let (status, body) = app
        .request(Method::DELETE, &path, None, Some(&alice.token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Permission not found or you do not have access."
    );
}

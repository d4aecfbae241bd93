//! Signup, login, profile and bearer-token handling.

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use zenith_auth::{Claims, JwtEncoder};
use zenith_core::config::auth::AuthConfig;

use crate::helpers::{SECRET, TestApp};

#[tokio::test]
async fn root_reports_liveness() {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Backend Server is Running!"));
}

#[tokio::test]
async fn signup_login_and_profile() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/signup",
            Some(json!({"email": " Alice@Example.com ", "password": "hunter22"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = app
        .request(
            Method::POST,
            "/login",
            Some(json!({"email": "alice@example.com", "password": "wrong"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .request(
            Method::POST,
            "/login",
            Some(json!({"email": "alice@example.com", "password": "hunter22"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(Method::GET, "/profile", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["subscription_status"], "free");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .request(Method::POST, "/signup", Some(json!({"email": "a@b.c"})), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
    assert_eq!(body["message"], "Email and password are required.");
}

#[tokio::test]
async fn missing_token_is_401() {
    let app = TestApp::new();
    let (status, body) = app.request(Method::GET, "/profile", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AUTHENTICATION");
    assert_eq!(body["message"], "Authorization token missing");
}

#[tokio::test]
async fn garbled_token_is_403() {
    let app = TestApp::new();
    let (status, body) = app
        .request(Method::GET, "/browse", None, Some("not-a-jwt"))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_401() {
    let app = TestApp::new();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "late@example.com".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = JwtEncoder::new(&AuthConfig {
        jwt_secret: SECRET.to_string(),
        token_ttl_hours: 24,
    })
    .encode_claims(&claims)
    .unwrap();

    let (status, body) = app
        .request(Method::GET, "/trash", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn profile_of_a_deleted_account_is_404() {
    let app = TestApp::new();
    let ghost = JwtEncoder::new(&AuthConfig {
        jwt_secret: SECRET.to_string(),
        token_ttl_hours: 1,
    })
    .encode_claims(&Claims {
        sub: Uuid::new_v4(),
        email: "ghost@example.com".to_string(),
        iat: Utc::now().timestamp(),
        exp: Utc::now().timestamp() + 600,
    })
    .unwrap();

    let (status, body) = app
        .request(Method::GET, "/profile", None, Some(&ghost))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

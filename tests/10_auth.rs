mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{get, register, send, test_app};

#[tokio::test]
async fn register_returns_token_and_user() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "Ada@Example.com",
            "password": "password123",
            "userType": "manager",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert!(body["token"].as_str().is_some());
    // Email is normalized and the hash never leaks
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "email": "x@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("firstName"), "got: {}", message);
    assert!(message.contains("password"), "got: {}", message);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = test_app();
    register(&app, "dup@example.com", "customer").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "firstName": "Again",
            "lastName": "User",
            "email": "DUP@example.com",
            "password": "password123",
            "userType": "customer",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn login_round_trips_credentials() {
    let app = test_app();
    register(&app, "login@example.com", "customer").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "login@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "login@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn whoami_returns_current_user() {
    let app = test_app();
    let (token, user_id) = register(&app, "me@example.com", "manager").await;

    let (status, body) = get(&app, "/api/auth/whoami", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], json!(user_id));
    assert_eq!(body["user"]["userType"], "manager");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/auth/whoami", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/auth/whoami",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn favorites_toggle_round_trips() {
    let app = test_app();
    let (manager, _) = register(&app, "mgr@example.com", "manager").await;
    let (customer, _) = register(&app, "cust@example.com", "customer").await;
    let property = common::create_property(&app, &manager, json!({})).await;
    let property_id = property["id"].as_str().unwrap();

    let uri = format!("/api/auth/favorites/{}", property_id);
    let (status, body) = common::patch(&app, &uri, &customer, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorited"], json!(true));
    assert_eq!(body["favoriteProperties"][0], json!(property_id));

    let (status, body) = common::patch(&app, &uri, &customer, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorited"], json!(false));
    assert_eq!(body["favoriteProperties"], json!([]));
}

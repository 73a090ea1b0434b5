mod common;

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};

use common::{create_property, delete, get, patch, post, register, test_app};

async fn create_request(app: &Router, manager: &str, customer: &str) -> Value {
    let property = create_property(app, manager, json!({})).await;
    let (status, body) = post(
        app,
        "/api/maintenance",
        customer,
        json!({
            "property": property["id"],
            "title": "Leaking tap",
            "description": "Kitchen tap drips constantly",
            "category": "plumbing",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create request failed: {}", body);
    body["request"].clone()
}

#[tokio::test]
async fn create_requires_existing_property_and_fields() {
    let app = test_app();
    let (customer, _) = register(&app, "c@example.com", "customer").await;

    let (status, body) = post(&app, "/api/maintenance", &customer, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("property"));

    let (status, _) = post(
        &app,
        "/api/maintenance",
        &customer,
        json!({
            "property": uuid::Uuid::new_v4(),
            "title": "Leaking tap",
            "description": "Drips",
            "category": "plumbing",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_defaults_and_populated_view() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    let (customer, customer_id) = register(&app, "c@example.com", "customer").await;

    let request = create_request(&app, &manager, &customer).await;
    assert_eq!(request["status"], "pending");
    assert_eq!(request["priority"], "medium");
    assert!(request["completedDate"].is_null());
    assert_eq!(request["customer"]["id"], json!(customer_id));
    assert!(request["property"]["address"].is_string());
}

#[tokio::test]
async fn completion_stamps_once() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    let (customer, _) = register(&app, "c@example.com", "customer").await;

    let request = create_request(&app, &manager, &customer).await;
    let uri = format!("/api/maintenance/{}/status", request["id"].as_str().unwrap());

    let (status, body) = patch(&app, &uri, &manager, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["status"], "completed");
    let completed = body["request"]["completedDate"].clone();
    assert!(completed.is_string());

    // Setting completed again keeps the first timestamp
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, body) = patch(&app, &uri, &manager, json!({ "status": "completed" })).await;
    assert_eq!(body["request"]["completedDate"], completed);
}

#[tokio::test]
async fn assignment_advances_pending_work() {
    let app = test_app();
    let (manager, manager_id) = register(&app, "m@example.com", "manager").await;
    let (customer, _) = register(&app, "c@example.com", "customer").await;

    let request = create_request(&app, &manager, &customer).await;
    let uri = format!("/api/maintenance/{}/assign", request["id"].as_str().unwrap());

    let (status, _) = patch(
        &app,
        &uri,
        &manager,
        json!({ "assignedTo": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = patch(&app, &uri, &manager, json!({ "assignedTo": manager_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["status"], "in_progress");
    assert_eq!(body["request"]["assignedTo"]["id"], json!(manager_id));

    // Assigning a completed request does not reopen it
    let status_uri = format!(
        "/api/maintenance/{}/status",
        request["id"].as_str().unwrap()
    );
    patch(&app, &status_uri, &manager, json!({ "status": "completed" })).await;
    let (_, body) = patch(&app, &uri, &manager, json!({ "assignedTo": manager_id })).await;
    assert_eq!(body["request"]["status"], "completed");
}

#[tokio::test]
async fn requests_are_visible_to_any_authenticated_user() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    let (customer, _) = register(&app, "c@example.com", "customer").await;
    let (other, _) = register(&app, "o@example.com", "customer").await;

    let request = create_request(&app, &manager, &customer).await;
    let id = request["id"].as_str().unwrap();

    let (status, body) = get(&app, "/api/maintenance", &other).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));

    let (status, body) = delete(&app, &format!("/api/maintenance/{}", id), &other).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, _) = get(&app, &format!("/api/maintenance/{}", id), &customer).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

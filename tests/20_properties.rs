mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{create_property, delete, get, post, put, register, test_app};

#[tokio::test]
async fn create_requires_manager_role() {
    let app = test_app();
    let (customer, _) = register(&app, "cust@example.com", "customer").await;

    let (status, body) = post(
        &app,
        "/api/properties",
        &customer,
        json!({
            "title": "Loft",
            "address": "1 Elm St",
            "propertyType": "Apartment",
            "price": 900.0,
            "bedrooms": 1,
            "bathrooms": 1,
            "area": 40.0,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn non_owner_update_is_forbidden_and_leaves_property_unchanged() {
    let app = test_app();
    let (m1, _) = register(&app, "m1@example.com", "manager").await;
    let (m2, _) = register(&app, "m2@example.com", "manager").await;

    let property = create_property(&app, &m1, json!({ "title": "Original title" })).await;
    let id = property["id"].as_str().unwrap();
    let uri = format!("/api/properties/{}", id);

    // Another manager: role alone is not ownership
    let (status, body) = put(&app, &uri, &m2, json!({ "title": "Hijacked" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{}", body);

    let (status, body) = get(&app, &uri, &m1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["property"]["title"], "Original title");
}

#[tokio::test]
async fn owner_can_update_and_delete() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    let property = create_property(&app, &manager, json!({})).await;
    let uri = format!("/api/properties/{}", property["id"].as_str().unwrap());

    let (status, body) = put(&app, &uri, &manager, json!({ "price": 1750.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["property"]["price"], 1750.0);

    let (status, _) = delete(&app, &uri, &manager).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &uri, &manager).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_only_callers_properties() {
    let app = test_app();
    let (m1, _) = register(&app, "m1@example.com", "manager").await;
    let (m2, _) = register(&app, "m2@example.com", "manager").await;
    create_property(&app, &m1, json!({ "title": "Mine" })).await;
    create_property(&app, &m2, json!({ "title": "Theirs" })).await;

    let (status, body) = get(&app, "/api/properties", &m1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["properties"][0]["title"], "Mine");
}

#[tokio::test]
async fn browse_applies_bounds_and_exact_matches() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    create_property(&app, &manager, json!({ "price": 800.0, "bedrooms": 2 })).await;
    create_property(&app, &manager, json!({ "price": 1500.0, "bedrooms": 2 })).await;
    create_property(&app, &manager, json!({ "price": 1800.0, "bedrooms": 3 })).await;
    create_property(&app, &manager, json!({ "price": 2500.0, "bedrooms": 2 })).await;

    let (customer, _) = register(&app, "c@example.com", "customer").await;
    let (status, body) = get(
        &app,
        "/api/properties/browse?minPrice=1000&maxPrice=2000&bedrooms=2",
        &customer,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProperties"], json!(1));
    for property in body["properties"].as_array().unwrap() {
        let price = property["price"].as_f64().unwrap();
        assert!((1000.0..=2000.0).contains(&price));
        assert_eq!(property["bedrooms"], json!(2));
        assert_eq!(property["status"], "available");
        assert_eq!(property["approved"], json!(true));
    }
}

#[tokio::test]
async fn browse_excludes_unapproved_and_non_available() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    create_property(&app, &manager, json!({ "title": "Visible" })).await;
    create_property(&app, &manager, json!({ "title": "Hidden", "approved": false })).await;
    let occupied = create_property(&app, &manager, json!({ "title": "Taken" })).await;
    let uri = format!("/api/properties/{}", occupied["id"].as_str().unwrap());
    put(&app, &uri, &manager, json!({ "status": "occupied" })).await;

    let (customer, _) = register(&app, "c@example.com", "customer").await;
    let (status, body) = get(&app, "/api/properties/browse", &customer).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProperties"], json!(1));
    assert_eq!(body["properties"][0]["title"], "Visible");
}

#[tokio::test]
async fn browse_location_and_amenities_filters() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    create_property(
        &app,
        &manager,
        json!({ "address": "14 ELM Street", "amenities": ["Parking", "Gym"] }),
    )
    .await;
    create_property(
        &app,
        &manager,
        json!({ "address": "3 Oak Avenue", "amenities": ["Parking"] }),
    )
    .await;

    let (customer, _) = register(&app, "c@example.com", "customer").await;

    let (_, body) = get(&app, "/api/properties/browse?location=elm", &customer).await;
    assert_eq!(body["totalProperties"], json!(1));

    let (_, body) = get(
        &app,
        "/api/properties/browse?amenities=parking,gym",
        &customer,
    )
    .await;
    assert_eq!(body["totalProperties"], json!(1));
    assert_eq!(body["properties"][0]["address"], "14 ELM Street");
}

#[tokio::test]
async fn browse_is_idempotent_and_paginates() {
    let app = test_app();
    let (manager, _) = register(&app, "m@example.com", "manager").await;
    for i in 0..5 {
        create_property(&app, &manager, json!({ "price": 1000.0 + i as f64 })).await;
    }

    let (customer, _) = register(&app, "c@example.com", "customer").await;
    let uri = "/api/properties/browse?sortBy=price&sortOrder=asc&limit=2&page=2";

    let (status, first) = get(&app, uri, &customer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["totalProperties"], json!(5));
    assert_eq!(first["totalPages"], json!(3));
    assert_eq!(first["currentPage"], json!(2));
    assert_eq!(first["properties"].as_array().unwrap().len(), 2);
    assert_eq!(first["properties"][0]["price"], 1002.0);

    // No writes in between: identical query, identical answer
    let (_, second) = get(&app, uri, &customer).await;
    assert_eq!(first, second);
}

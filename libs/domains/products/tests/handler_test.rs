//! Handler tests for Products domain
//!
//! Drive the product router with `oneshot`, mostly over the in-memory repository:
//! - Request deserialization and defaults
//! - HTTP status codes
//! - Error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, body: Value) -> Product {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_200_with_id() {
    let app = app();

    let product = create(
        &app,
        json!({ "name": "Item A", "description": "first", "price": 9.5 }),
    )
    .await;

    assert_eq!(product.id, Some(1));
    assert_eq!(product.name, "Item A");
    assert_eq!(product.description, "first");
    assert_eq!(product.price, 9.5);
}

#[tokio::test]
async fn test_create_product_ignores_body_id_and_applies_defaults() {
    let app = app();

    let product = create(&app, json!({ "id": 77, "name": "Bare" })).await;

    assert_eq!(product.id, Some(1));
    assert_eq!(product.description, "");
    assert_eq!(product.price, 0.0);
}

#[tokio::test]
async fn test_list_products_returns_all_in_id_order() {
    let app = app();
    create(&app, json!({ "name": "A", "description": "", "price": 1.0 })).await;
    create(&app, json!({ "name": "B", "description": "", "price": 2.0 })).await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "A");
    assert_eq!(products[1].name, "B");
}

#[tokio::test]
async fn test_list_products_empty() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_get_product_found() {
    let app = app();
    let created = create(&app, json!({ "name": "Lamp", "price": 39.9 })).await;

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product, created);
}

#[tokio::test]
async fn test_get_product_not_found_returns_404() {
    let response = app().oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_update_product_overwrites_fields_and_keeps_id() {
    let app = app();
    create(&app, json!({ "name": "Old", "description": "old", "price": 1.0 })).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/1",
            json!({ "id": 5, "name": "New", "description": "new", "price": 2.5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.id, Some(1));
    assert_eq!(updated.name, "New");
    assert_eq!(updated.description, "new");
    assert_eq!(updated.price, 2.5);

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();
    let stored: Product = json_body(response.into_body()).await;
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_update_missing_product_returns_404_and_creates_nothing() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/42", json!({ "name": "Ghost" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_delete_product_returns_200_with_empty_body() {
    let app = app();
    create(&app, json!({ "name": "Doomed" })).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(text_body(response.into_body()).await.is_empty());

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_product_still_returns_200() {
    let response = app()
        .oneshot(empty_request("DELETE", "/12345"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = app();
    create(&app, json!({ "name": "A" })).await;
    app.clone()
        .oneshot(empty_request("DELETE", "/1"))
        .await
        .unwrap();

    let product = create(&app, json!({ "name": "B" })).await;

    assert_eq!(product.id, Some(2));
}

#[tokio::test]
async fn test_non_integer_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_string_path_is_treated_as_an_id() {
    let response = app()
        .oneshot(empty_request("GET", "/string"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_demo_returns_hello_world() {
    let response = app().oneshot(empty_request("GET", "/demo")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response.into_body()).await, "hello world");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_fields_default_consistently() {
    let app = app();

    let product = create(&app, json!({ "price": 3.0 })).await;
    assert_eq!(product.id, Some(1));
    assert_eq!(product.name, "");
    assert_eq!(product.description, "");
    assert_eq!(product.price, 3.0);

    let product = create(&app, json!({ "description": "only text" })).await;
    assert_eq!(product.name, "");
    assert_eq!(product.price, 0.0);
}

#[tokio::test]
async fn test_wrong_field_type_returns_422() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "name": "Lamp", "price": "cheap" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_database_failure_returns_500_without_driver_text() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom(
            "password authentication failed for user admin".into(),
        )])
        .into_connection();
    let app = handlers::router(ProductService::new(PgProductRepository::new(db)));

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = text_body(response.into_body()).await;
    assert!(!body.contains("password"), "driver text in body: {}", body);
    assert!(!body.contains("admin"), "driver text in body: {}", body);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert_eq!(body["code"], 5003);
}

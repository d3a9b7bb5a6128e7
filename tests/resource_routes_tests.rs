//! User and product route tests

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use serde_json::{Value, json};
use std::sync::Arc;

use microservice::api::AppState;
use microservice::api::middleware::TimingMiddleware;
use microservice::config::MetricsConfig;
use microservice::metrics::PrometheusMetrics;
use microservice::metrics_core::NoopMetrics;

#[actix_web::test]
async fn test_user_crud_flow() {
    let state = AppState::new(NoopMetrics::arc());
    let app = test::init_service(
        App::new()
            .wrap(TimingMiddleware::new(state.metrics.clone()))
            .configure(|cfg| state.configure(cfg)),
    )
    .await;

    // Create
    let req = TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Ada");

    // Read
    let resp = test::call_service(&app, TestRequest::get().uri("/users/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "ada@example.com");

    // Update
    let req = TestRequest::put()
        .uri("/users/1")
        .set_json(json!({"name": "Ada Lovelace", "email": "ada@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Ada Lovelace");

    // List
    let resp = test::call_service(&app, TestRequest::get().uri("/users").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    // Delete
    let resp = test::call_service(&app, TestRequest::delete().uri("/users/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(&app, TestRequest::get().uri("/users/1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1004);
    assert_eq!(body["message"], "user 1 not found");
}

#[actix_web::test]
async fn test_products_are_independent_of_users() {
    let state = AppState::new(NoopMetrics::arc());
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = TestRequest::post()
        .uri("/products")
        .set_json(json!({"name": "Widget", "price": 9.5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["price"], 9.5);

    assert_eq!(state.products.len(), 1);
    assert!(state.users.is_empty());
}

#[actix_web::test]
async fn test_update_and_delete_missing_return_404() {
    let state = AppState::new(NoopMetrics::arc());
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = TestRequest::put()
        .uri("/products/7")
        .set_json(json!({"name": "Ghost", "price": 1.0}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::delete().uri("/products/7").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_malformed_body_is_rejected() {
    let state = AppState::new(NoopMetrics::arc());
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = TestRequest::post()
        .uri("/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.users.is_empty());
}

#[actix_web::test]
async fn test_crud_statuses_are_counted_per_template() {
    let metrics = Arc::new(PrometheusMetrics::new(&MetricsConfig::default()).unwrap());
    let state = AppState::new(metrics.clone());
    let app = test::init_service(
        App::new()
            .wrap(TimingMiddleware::new(state.metrics.clone()))
            .configure(|cfg| state.configure(cfg)),
    )
    .await;

    let req = TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
        .to_request();
    test::call_service(&app, req).await;
    test::call_service(&app, TestRequest::get().uri("/users/1").to_request()).await;
    test::call_service(&app, TestRequest::get().uri("/users/2").to_request()).await;

    let created = metrics
        .http_requests_total
        .with_label_values(&["POST", "/users", "201"])
        .get();
    let found = metrics
        .http_requests_total
        .with_label_values(&["GET", "/users/{id}", "200"])
        .get();
    let missing = metrics
        .http_requests_total
        .with_label_values(&["GET", "/users/{id}", "404"])
        .get();
    assert_eq!((created, found, missing), (1, 1, 1));
}

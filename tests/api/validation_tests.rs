//! Request validation tests
//!
//! The validated extractors must reject before auth-protected handlers run
//! and report every field error at once.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use ride_chat_server::application::dto::request::CreateUserRequest;
use ride_chat_server::presentation::http::extractors::{ValidatedJson, ValidatedQuery};
use ride_chat_server::shared::pagination::PageRequest;

use crate::common::body_json;

async fn create_stub(ValidatedJson(body): ValidatedJson<CreateUserRequest>) -> Json<serde_json::Value> {
    Json(json!({ "email": body.email }))
}

async fn list_stub(ValidatedQuery(query): ValidatedQuery<PageRequest>) -> Json<serde_json::Value> {
    Json(json!({ "page": query.page(), "limit": query.limit() }))
}

fn app() -> Router {
    Router::new()
        .route("/users", post(create_stub))
        .route("/users", get(list_stub))
}

async fn post_json(router: Router, uri: &str, body: &str) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_uri(router: Router, uri: &str) -> axum::response::Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_all_field_errors_reported_at_once() {
    let body = json!({
        "name": "",
        "last_name": "Silva",
        "email": "nao-e-email",
        "password": "123",
        "cpf": "12345678900",
        "phone": "+5511912345678"
    })
    .to_string();

    let response = post_json(app(), "/users", &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "3 erro(s) ocorreram");
    let errors: Vec<String> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| e.starts_with("email:")));
    assert!(errors.iter().any(|e| e.starts_with("name:")));
    assert!(errors.iter().any(|e| e.starts_with("password:")));
}

#[tokio::test]
async fn test_valid_body_reaches_handler() {
    let body = json!({
        "name": "Ana",
        "last_name": "Silva",
        "email": "ana@example.com",
        "password": "senha-forte",
        "cpf": "12345678900",
        "phone": "+5511912345678"
    })
    .to_string();

    let response = post_json(app(), "/users", &body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["email"], "ana@example.com");
}

#[tokio::test]
async fn test_pagination_defaults_apply_when_absent() {
    let response = get_uri(app(), "/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn test_out_of_range_pagination_is_rejected() {
    let response = get_uri(app(), "/users?page=0&limit=1000").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "2 erro(s) ocorreram");
}

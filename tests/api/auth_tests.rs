//! Authentication middleware tests
//!
//! Exercises the bearer-token contract on a protected route: every 401
//! variant carries the Portuguese message plus a distinct machine code.

use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;

use ride_chat_server::presentation::middleware::Claims;

use crate::common::{bearer_token, body_json, rate_limit_settings, TestApp, TEST_SECRET};

fn app() -> TestApp {
    TestApp::protected(rate_limit_settings(60, 30))
}

fn expired_token() -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "7".into(),
        email: "ana@example.com".into(),
        name: "Ana".into(),
        is_driver: false,
        is_passenger: true,
        exp: now - 3600,
        iat: now - 7200,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_missing_header_is_401() {
    let response = app().get("/users/7").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Não autorizado");
    assert_eq!(body["error"], "Authorization header missing");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_401() {
    let response = app()
        .get_with_authorization("/users/7", "Basic dXNlcjpwYXNz")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid authorization header format");
}

#[tokio::test]
async fn test_empty_bearer_token_is_401() {
    let response = app().get_with_authorization("/users/7", "Bearer  ").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Empty bearer token");
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let response = app().get_auth("/users/7", &expired_token()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Token expired");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_401() {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "7".into(),
        email: "ana@example.com".into(),
        name: "Ana".into(),
        is_driver: false,
        is_passenger: true,
        exp: now + 3600,
        iat: now,
    };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-used-by-an-attacker"),
    )
    .unwrap();

    let response = app().get_auth("/users/7", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_malformed_token_is_401() {
    let response = app().get_auth("/users/7", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_handler_with_identity() {
    let response = app().get_auth("/users/7", &bearer_token(7)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["email"], "user7@example.com");
}

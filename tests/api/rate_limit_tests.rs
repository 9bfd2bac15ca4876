//! Rate limiting middleware tests
//!
//! The limiters sit behind authentication so budgets are keyed by user id.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use ride_chat_server::presentation::middleware::{rate_limit_default, RateLimiters};

use crate::common::{bearer_token, body_json, rate_limit_settings, TestApp};

#[tokio::test]
async fn test_request_over_budget_is_429_with_retry_hint() {
    let app = TestApp::protected(rate_limit_settings(5, 30));
    let token = bearer_token(1);

    for _ in 0..5 {
        let response = app.get_auth("/users/1", &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.get_auth("/users/1", &token).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("Retry-After"));
    assert_eq!(
        response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok()),
        Some("0")
    );

    let body = body_json(response).await;
    assert_eq!(body["error"], "RATE_LIMITED");
    assert_eq!(body["message"], "Muitas requisições. Tente novamente em instantes.");
    assert!(body["retryAfter"].as_u64().unwrap() >= 1);
    assert!(body["docs"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_budgets_are_per_user() {
    let app = TestApp::protected(rate_limit_settings(2, 30));

    let first = bearer_token(1);
    assert_eq!(app.get_auth("/users/1", &first).await.status(), StatusCode::OK);
    assert_eq!(app.get_auth("/users/1", &first).await.status(), StatusCode::OK);
    assert_eq!(
        app.get_auth("/users/1", &first).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    // Another account still has its full budget
    let second = bearer_token(2);
    assert_eq!(app.get_auth("/users/2", &second).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_successful_responses_carry_rate_limit_headers() {
    let app = TestApp::protected(rate_limit_settings(10, 30));

    let response = app.get_auth("/users/1", &bearer_token(1)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("X-RateLimit-Limit")
            .and_then(|v| v.to_str().ok()),
        Some("10")
    );
    assert_eq!(
        response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok()),
        Some("9")
    );
    assert!(response.headers().contains_key("X-RateLimit-Reset"));
}

#[tokio::test]
async fn test_exempt_get_list_is_never_limited() {
    let app = TestApp::protected(rate_limit_settings(2, 30));
    let token = bearer_token(1);

    for _ in 0..10 {
        let response = app.get_auth("/users", &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_message_send_uses_its_own_cap() {
    let app = TestApp::protected(rate_limit_settings(60, 3));
    let token = bearer_token(1);

    for _ in 0..3 {
        let response = app
            .post_json_auth("/chat-groups/1/messages", r#"{"content":"oi"}"#, &token)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .post_json_auth("/chat-groups/1/messages", r#"{"content":"oi"}"#, &token)
        .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // The default budget is untouched by message sends
    assert_eq!(app.get_auth("/users/1", &token).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unauthenticated_clients_are_keyed_by_connection_ip() {
    let limiters = RateLimiters::from_settings(&rate_limit_settings(1, 30));
    let router = Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route_layer(middleware::from_fn_with_state(limiters, rate_limit_default));

    let request = |ip: [u8; 4]| {
        Request::builder()
            .uri("/ping")
            .extension(ConnectInfo(SocketAddr::from((ip, 40000))))
            .body(Body::empty())
            .unwrap()
    };

    let first = router.clone().oneshot(request([10, 0, 0, 1])).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = router.clone().oneshot(request([10, 0, 0, 1])).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different source address has its own budget
    let other = router.clone().oneshot(request([10, 0, 0, 2])).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

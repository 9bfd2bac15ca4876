//! Health endpoint tests

use axum::{body::Body, extract::Request, http::StatusCode, routing::get, Router};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use ride_chat_server::presentation::http::handlers::health::health_check;

use crate::common::body_json;

#[tokio::test]
async fn test_health_reports_up_with_service_name() {
    let router = Router::new().route("/health", get(health_check));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
    assert_eq!(body["service"], "ride-chat-server");
}

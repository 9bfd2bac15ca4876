//! Common Test Utilities
//!
//! Shared helpers and test infrastructure. The routers built here carry the
//! real auth and rate-limit middleware in front of stub handlers, so the
//! transport contract can be exercised without a database.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ride_chat_server::config::{JwtSettings, RateLimitSettings};
use ride_chat_server::presentation::middleware::{
    auth_middleware, issue_token, rate_limit_default, rate_limit_messages, AuthUser, RateLimiters,
};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: TEST_SECRET.into(),
        access_token_expiry_minutes: 60,
    }
}

pub fn rate_limit_settings(default: u32, messages: u32) -> RateLimitSettings {
    RateLimitSettings {
        default_per_minute: default,
        messages_per_minute: messages,
        search_per_minute: 20,
        window_seconds: 60,
    }
}

pub fn test_user(id: i64) -> AuthUser {
    AuthUser {
        id,
        email: format!("user{}@example.com", id),
        name: "Ana".into(),
        is_driver: false,
        is_passenger: true,
    }
}

pub fn bearer_token(id: i64) -> String {
    issue_token(&test_user(id), &jwt_settings()).unwrap()
}

async fn whoami(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({ "id": user.id, "email": user.email }))
}

async fn accepted() -> StatusCode {
    StatusCode::OK
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Router with the protected-route middleware stack: rate limiting keyed
    /// by the authenticated user, auth running first.
    pub fn protected(limits: RateLimitSettings) -> Self {
        let limiters = RateLimiters::from_settings(&limits);

        let router = Router::new()
            .route("/users", get(accepted))
            .route("/users/{user_id}", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                limiters.clone(),
                rate_limit_default,
            ))
            .route_layer(middleware::from_fn_with_state(
                jwt_settings(),
                auth_middleware,
            ));

        let messages = Router::new()
            .route("/chat-groups/{group_id}/messages", post(accepted))
            .route_layer(middleware::from_fn_with_state(
                limiters,
                rate_limit_messages,
            ))
            .route_layer(middleware::from_fn_with_state(
                jwt_settings(),
                auth_middleware,
            ));

        Self {
            router: router.merge(messages),
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make an authenticated GET request
    pub async fn get_auth(&self, uri: &str, token: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a GET request with a raw Authorization header value
    pub async fn get_with_authorization(
        &self,
        uri: &str,
        header_value: &str,
    ) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header("Authorization", header_value)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json_auth(
        &self,
        uri: &str,
        body: &str,
        token: &str,
    ) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

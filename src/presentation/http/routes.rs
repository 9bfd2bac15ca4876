//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{
    auth_middleware, rate_limit_default, rate_limit_messages, rate_limit_search,
};
use crate::startup::AppState;

/// Create the main API router.
///
/// Protected routes run authentication before rate limiting, so limits are
/// keyed by user id whenever a valid token is present. Layers added last run
/// first, which is why the auth layer is attached after the rate limiters.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", user_routes(&state))
        .nest("/groups", ride_group_routes(&state))
        .nest("/chat-groups", chat_group_routes(&state))
        .nest("/messages", message_routes(&state))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// User routes; registration is public, everything else requires a token
fn user_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(handlers::user::list_users))
        .route("/{user_id}", get(handlers::user::get_user))
        .route("/{user_id}", put(handlers::user::update_user))
        .route("/{user_id}", delete(handlers::user::delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.limiters.clone(),
            rate_limit_default,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.settings.jwt.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", post(handlers::user::create_user))
        .merge(protected)
}

/// Ride group routes (protected)
fn ride_group_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::ride_group::create_ride_group))
        .route("/{group_id}", get(handlers::ride_group::get_ride_group))
        .route_layer(middleware::from_fn_with_state(
            state.limiters.clone(),
            rate_limit_default,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.settings.jwt.clone(),
            auth_middleware,
        ))
}

/// Chat group routes (protected); listing counts against the search limiter
fn chat_group_routes(state: &AppState) -> Router<AppState> {
    let listing = Router::new()
        .route("/", get(handlers::chat_group::list_chat_groups))
        .route_layer(middleware::from_fn_with_state(
            state.limiters.clone(),
            rate_limit_search,
        ));

    let sending = Router::new()
        .route("/{group_id}/messages", post(handlers::message::send_message))
        .route_layer(middleware::from_fn_with_state(
            state.limiters.clone(),
            rate_limit_messages,
        ));

    let rest = Router::new()
        .route("/", post(handlers::chat_group::create_chat_group))
        .route("/{group_id}", get(handlers::chat_group::get_chat_group))
        .route(
            "/{group_id}",
            delete(handlers::chat_group::deactivate_chat_group),
        )
        .route("/{group_id}/messages", get(handlers::message::list_messages))
        .route_layer(middleware::from_fn_with_state(
            state.limiters.clone(),
            rate_limit_default,
        ));

    listing
        .merge(sending)
        .merge(rest)
        .route_layer(middleware::from_fn_with_state(
            state.settings.jwt.clone(),
            auth_middleware,
        ))
}

/// Message routes (protected)
fn message_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/{message_id}", put(handlers::message::edit_message))
        .route("/{message_id}", delete(handlers::message::delete_message))
        .route(
            "/{message_id}/delivered",
            post(handlers::message::mark_delivered),
        )
        .route("/{message_id}/read", post(handlers::message::mark_read))
        .route_layer(middleware::from_fn_with_state(
            state.limiters.clone(),
            rate_limit_default,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.settings.jwt.clone(),
            auth_middleware,
        ))
}

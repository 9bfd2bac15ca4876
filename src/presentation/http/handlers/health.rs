//! Health Check Handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;

use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
}

/// Health response: `{"status": "UP", "service": "<name>"}`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Readiness response with uptime and database status
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub uptime_seconds: u64,
    pub database: &'static str,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        service: env!("CARGO_PKG_NAME"),
    })
}

/// Readiness probe - checks whether the database accepts queries.
/// Returns 200 if ready, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_seconds = SERVER_START.elapsed().as_secs();

    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "UP",
                service: env!("CARGO_PKG_NAME"),
                uptime_seconds,
                database: "up",
            }),
        ),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "DOWN",
                    service: env!("CARGO_PKG_NAME"),
                    uptime_seconds,
                    database: "down",
                }),
            )
        }
    }
}

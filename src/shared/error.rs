//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! User-facing `message` fields are Portuguese; the `error` field carries a
//! stable English code for programmatic handling.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Public documentation URL referenced by rate-limit responses.
pub const RATE_LIMIT_DOCS_URL: &str = "https://docs.ridechat.example/rate-limits";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email conflict")]
    EmailConflict,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Deletion failed")]
    DeletionFailed,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Rate limited")]
    RateLimited { retry_after: u64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
            errors: None,
            retry_after: None,
            docs: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg, "NOT_FOUND")),
            AppError::EmailConflict => (
                StatusCode::CONFLICT,
                ErrorResponse::new("E-mail já cadastrado", "EMAIL_CONFLICT"),
            ),
            AppError::InvalidArgument(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, "INVALID_ARGUMENT"))
            }
            AppError::DeletionFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Não foi possível excluir o registro", "DELETION_FAILED"),
            ),
            AppError::Unauthorized(detail) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Não autorizado", detail),
            ),
            AppError::Validation(errors) => {
                let body = ErrorResponse {
                    message: format!("{} erro(s) ocorreram", errors.len()),
                    error: None,
                    errors: Some(errors),
                    retry_after: None,
                    docs: None,
                };
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::RateLimited { retry_after } => {
                let body = ErrorResponse {
                    message: "Muitas requisições. Tente novamente em instantes.".into(),
                    error: Some("RATE_LIMITED".into()),
                    errors: None,
                    retry_after: Some(retry_after),
                    docs: Some(RATE_LIMIT_DOCS_URL.into()),
                };
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                if let Ok(v) = header::HeaderValue::from_str(&retry_after.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, v);
                }
                return response;
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Erro interno do servidor", "INTERNAL"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Erro interno do servidor", "INTERNAL"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

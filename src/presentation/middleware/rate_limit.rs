//! Rate Limiting Middleware
//!
//! In-process sliding-window rate limiting. Counters are the only
//! cross-request shared state in the process; `DashMap`'s per-key entry lock
//! makes the check-and-insert atomic, so concurrent bursts cannot
//! undercount.

use std::net::IpAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, OriginalUri, Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde::Serialize;

use crate::config::RateLimitSettings;
use crate::presentation::middleware::auth::AuthUser;
use crate::shared::error::AppError;

// ============================================================================
// Rate Limit Configuration
// ============================================================================

/// Configuration for one limiter class.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub requests_per_window: u32,
    /// Window duration in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 60,
            window_seconds: 60,
        }
    }
}

/// Endpoint classes with distinct caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointClass {
    /// Standard API endpoints (60/min)
    Default,
    /// Message sending (30/min)
    MessageSend,
    /// Search endpoints (20/min)
    Search,
}

impl EndpointClass {
    fn key_prefix(&self) -> &'static str {
        match self {
            EndpointClass::Default => "rl:api",
            EndpointClass::MessageSend => "rl:msg",
            EndpointClass::Search => "rl:search",
        }
    }
}

// ============================================================================
// Rate Limit Response
// ============================================================================

/// Information about rate limit status returned to clients.
#[derive(Debug, Serialize)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets
    pub reset_at: i64,
    /// Seconds until the client may retry
    pub retry_after: u64,
}

// ============================================================================
// Rate Limiter Implementation
// ============================================================================

/// Sliding-window rate limiter over an in-process counter table.
///
/// Each key maps to the timestamps (ms) of its requests inside the current
/// window. On check, stale timestamps are pruned, the count compared against
/// the cap, and the new timestamp appended in the same entry lock.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<DashMap<String, Vec<i64>>>,
    config: RateLimitConfig,
    class: EndpointClass,
}

impl RateLimiter {
    pub fn new(class: EndpointClass, config: RateLimitConfig) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            config,
            class,
        }
    }

    /// Check if a request should be allowed.
    ///
    /// Returns `Ok(RateLimitInfo)` if allowed, `Err(RateLimitInfo)` if rate
    /// limited.
    pub fn check(&self, identifier: &str) -> Result<RateLimitInfo, RateLimitInfo> {
        let key = format!("{}:{}", self.class.key_prefix(), identifier);
        let now_ms = chrono::Utc::now().timestamp_millis();
        let window_ms = (self.config.window_seconds * 1000) as i64;
        let max_requests = self.config.requests_per_window;
        let reset_at = (now_ms + window_ms) / 1000;

        // The entry guard holds the shard lock for this key, making the
        // prune + count + insert sequence atomic.
        let mut entry = self.store.entry(key).or_default();
        entry.retain(|t| *t > now_ms - window_ms);

        if (entry.len() as u32) < max_requests {
            entry.push(now_ms);
            Ok(RateLimitInfo {
                limit: max_requests,
                remaining: max_requests - entry.len() as u32,
                reset_at,
                retry_after: 0,
            })
        } else {
            // Oldest entry leaving the window frees the next slot.
            let retry_ms = entry
                .first()
                .map(|oldest| oldest + window_ms - now_ms)
                .unwrap_or(window_ms);
            Err(RateLimitInfo {
                limit: max_requests,
                remaining: 0,
                reset_at,
                retry_after: ((retry_ms as f64) / 1000.0).ceil().max(1.0) as u64,
            })
        }
    }

    /// Drop all counters whose window has fully elapsed.
    pub fn prune(&self) {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let window_ms = (self.config.window_seconds * 1000) as i64;
        self.store
            .retain(|_, stamps| stamps.iter().any(|t| *t > now_ms - window_ms));
    }
}

/// The limiter classes shared across the router.
#[derive(Clone)]
pub struct RateLimiters {
    pub default: RateLimiter,
    pub message_send: RateLimiter,
    pub search: RateLimiter,
}

impl RateLimiters {
    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self {
            default: RateLimiter::new(
                EndpointClass::Default,
                RateLimitConfig {
                    requests_per_window: settings.default_per_minute,
                    window_seconds: settings.window_seconds,
                },
            ),
            message_send: RateLimiter::new(
                EndpointClass::MessageSend,
                RateLimitConfig {
                    requests_per_window: settings.messages_per_minute,
                    window_seconds: settings.window_seconds,
                },
            ),
            search: RateLimiter::new(
                EndpointClass::Search,
                RateLimitConfig {
                    requests_per_window: settings.search_per_minute,
                    window_seconds: settings.window_seconds,
                },
            ),
        }
    }
}

// ============================================================================
// Identifier Extraction
// ============================================================================

/// Extract the rate limit identifier from a request.
///
/// Priority:
/// 1. Authenticated user ID (cannot be spoofed)
/// 2. X-Forwarded-For header (first IP in chain, reverse proxy setups)
/// 3. X-Real-IP header
/// 4. Connection IP address
fn extract_identifier(request: &Request, client_ip: Option<IpAddr>) -> String {
    if let Some(auth_user) = request.extensions().get::<AuthUser>() {
        return format!("user:{}", auth_user.id);
    }

    if let Some(forwarded_for) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first_ip) = forwarded_for.split(',').next() {
            let ip = first_ip.trim();
            if ip.parse::<IpAddr>().is_ok() {
                return format!("ip:{}", ip);
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
    {
        if real_ip.parse::<IpAddr>().is_ok() {
            return format!("ip:{}", real_ip);
        }
    }

    match client_ip {
        Some(ip) => format!("ip:{}", ip),
        None => {
            tracing::warn!("Could not determine client identifier for rate limiting");
            "ip:unknown".to_string()
        }
    }
}

/// List endpoints that skip the default limiter.
pub fn is_exempt(method: &Method, path: &str) -> bool {
    if *method != Method::GET {
        return false;
    }
    path == "/users"
        || (path.starts_with("/chat-groups/") && path.ends_with("/messages"))
}

// ============================================================================
// Middleware Functions
// ============================================================================

/// Rate limiting middleware for standard API endpoints.
///
/// Exempt GET list endpoints pass through without consuming a slot. Nested
/// routers strip the matched prefix from `request.uri()`, so the exemption
/// check runs against the original request path.
pub async fn rate_limit_default(
    State(limiters): State<RateLimiters>,
    request: Request,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    if is_exempt(request.method(), &path) {
        return next.run(request).await;
    }
    rate_limit_inner(&limiters.default, request, next).await
}

/// Rate limiting middleware for message-send endpoints.
pub async fn rate_limit_messages(
    State(limiters): State<RateLimiters>,
    request: Request,
    next: Next,
) -> Response {
    rate_limit_inner(&limiters.message_send, request, next).await
}

/// Rate limiting middleware for search endpoints.
pub async fn rate_limit_search(
    State(limiters): State<RateLimiters>,
    request: Request,
    next: Next,
) -> Response {
    rate_limit_inner(&limiters.search, request, next).await
}

async fn rate_limit_inner(limiter: &RateLimiter, request: Request, next: Next) -> Response {
    let client_ip = request
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip());
    let identifier = extract_identifier(&request, client_ip);

    match limiter.check(&identifier) {
        Ok(info) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(response.headers_mut(), &info);
            response
        }
        Err(info) => {
            tracing::warn!(identifier = %identifier, "Rate limit exceeded");
            let mut response = AppError::RateLimited {
                retry_after: info.retry_after,
            }
            .into_response();
            add_rate_limit_headers(response.headers_mut(), &info);
            response
        }
    }
}

/// Add rate limit headers to a response.
///
/// Headers follow the IETF draft standard for rate limiting:
/// https://datatracker.ietf.org/doc/draft-ietf-httpapi-ratelimit-headers/
fn add_rate_limit_headers(headers: &mut header::HeaderMap, info: &RateLimitInfo) {
    if let Ok(v) = header::HeaderValue::from_str(&info.limit.to_string()) {
        headers.insert("X-RateLimit-Limit", v);
    }
    if let Ok(v) = header::HeaderValue::from_str(&info.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", v);
    }
    if let Ok(v) = header::HeaderValue::from_str(&info.reset_at.to_string()) {
        headers.insert("X-RateLimit-Reset", v);
    }
}

// ============================================================================
// Tests
// ============================================================================

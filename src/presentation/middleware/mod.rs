//! Middleware
//!
//! Tower middleware for request processing. Protected routes run
//! authentication, then rate limiting (keyed by the authenticated identity),
//! and finally the handler's validated extractors.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rate_limit;

pub use auth::{auth_middleware, issue_token, AuthUser, Claims};
pub use rate_limit::{
    is_exempt, rate_limit_default, rate_limit_messages, rate_limit_search, EndpointClass,
    RateLimitConfig, RateLimitInfo, RateLimiter, RateLimiters,
};

//! Presentation Layer
//!
//! HTTP handlers, routes and middleware.

pub mod http;
pub mod middleware;

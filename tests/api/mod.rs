//! REST API endpoint tests

mod auth_tests;
mod health_tests;
mod rate_limit_tests;
mod router_tests;
mod validation_tests;

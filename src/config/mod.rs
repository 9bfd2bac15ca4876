//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! Settings are loaded once at startup and passed by reference through
//! `AppState`; business logic never reads the environment directly.

mod settings;

pub use settings::*;

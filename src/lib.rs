//! # Ride Chat Server Library
//!
//! This crate provides the backend API for a ride-sharing service with
//! built-in group chat:
//!
//! - RESTful HTTP API endpoints with request validation
//! - JWT bearer authentication
//! - Per-client sliding-window rate limiting
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Single-operation use cases and DTOs
//! - **Infrastructure Layer**: PostgreSQL repository implementations
//! - **Presentation Layer**: HTTP handlers, routes and middleware
//!
//! ## Module Structure
//!
//! ```text
//! ride_chat_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities and repository traits
//! +-- application/    Use cases and DTOs
//! +-- infrastructure/ Database implementations
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common utilities (errors, pagination)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Use cases and DTOs
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;

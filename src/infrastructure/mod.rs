//! Infrastructure Layer
//!
//! Concrete implementations for external collaborators:
//! - PostgreSQL connection pool and migrations
//! - Repository implementations over sqlx

pub mod database;
pub mod repositories;

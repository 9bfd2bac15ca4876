//! # Domain Layer
//!
//! The domain layer contains the core business rules of the ride chat
//! platform. It is independent of any external frameworks or infrastructure
//! concerns.
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Entities encapsulate their own invariant checks
//! - Repository traits define data access contracts

pub mod entities;

pub use entities::*;

//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** - User CRUD with email lookup
//! - **PgChatGroupRepository** - Chat groups with soft deactivation
//! - **PgMessageRepository** - Messages with soft deletion
//! - **PgRideGroupRepository** - Ride groups plus membership rows

pub mod chat_group_repository;
pub mod message_repository;
pub mod ride_group_repository;
pub mod user_repository;

pub use chat_group_repository::PgChatGroupRepository;
pub use message_repository::PgMessageRepository;
pub use ride_group_repository::PgRideGroupRepository;
pub use user_repository::PgUserRepository;

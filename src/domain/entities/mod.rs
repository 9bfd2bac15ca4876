//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the ride
//! chat platform. All entities map directly to their corresponding database
//! tables.
//!
//! ## Core Entities
//!
//! - **User**: Account with authentication data, verification flag, and
//!   driver/passenger roles
//! - **ChatGroup**: A conversation space (group or direct), soft-deactivated
//! - **Message**: A message in a chat group with a monotone delivery status
//!   and soft deletion
//! - **RideGroup**: A driver plus 1-5 passengers sharing a ride
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod chat_group;
mod message;
mod ride_group;
mod user;

pub use chat_group::{ChatGroup, ChatGroupKind, ChatGroupRepository};
pub use message::{Message, MessageKind, MessageRepository, MessageStatus, MAX_CONTENT_LENGTH};
pub use ride_group::{RideGroup, RideGroupRepository, MAX_RIDE_MEMBERS};
pub use user::{User, UserRepository};

#[cfg(test)]
pub use chat_group::MockChatGroupRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use ride_group::MockRideGroupRepository;
#[cfg(test)]
pub use user::MockUserRepository;

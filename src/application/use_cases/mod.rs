//! Use Cases
//!
//! Single-operation orchestrators invoked by the transport handlers. Each
//! use case exposes one public `execute` entry point, composes repository
//! calls with entity validation, and reports failures through its own error
//! enum, mapped into `AppError` at the handler boundary.

pub mod chat_group;
pub mod message;
pub mod ride_group;
pub mod user;

pub use chat_group::{
    ChatGroupError, CreateChatGroupInput, CreateChatGroupUseCase, DeactivateChatGroupUseCase,
    GetChatGroupUseCase, ListChatGroupsUseCase,
};
pub use message::{
    AdvanceMessageStatusUseCase, DeleteMessageUseCase, EditMessageUseCase, ListMessagesUseCase,
    MessageError, SendMessageInput, SendMessageUseCase, StatusAdvance,
};
pub use ride_group::{
    CreateRideGroupInput, CreateRideGroupUseCase, GetRideGroupUseCase, RideGroupError,
};
pub use user::{
    hash_password, verify_password, CreateUserInput, CreateUserUseCase, DeleteUserUseCase,
    GetUserUseCase, ListUsersUseCase, UpdateUserInput, UpdateUserUseCase, UserError,
};

//! HTTP Request Handlers

pub mod chat_group;
pub mod health;
pub mod message;
pub mod ride_group;
pub mod user;

//! Message use cases.
//!
//! Sending runs the entity validation; editing is restricted to the sender's
//! own text messages; deletion is a soft delete that keeps the row.

use std::sync::Arc;

use crate::domain::{
    ChatGroupRepository, Message, MessageKind, MessageRepository, MessageStatus,
};
use crate::shared::error::AppError;
use crate::shared::pagination::Page;

/// Message use-case errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Message not found")]
    NotFound,

    #[error("Chat group not found")]
    GroupNotFound,

    #[error("Sender does not own this message")]
    Forbidden,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<MessageError> for AppError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::NotFound => AppError::NotFound("Mensagem não encontrada".into()),
            MessageError::GroupNotFound => {
                AppError::NotFound("Grupo de chat não encontrado".into())
            }
            MessageError::Forbidden => {
                AppError::Unauthorized("Sender does not own this message".into())
            }
            MessageError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            MessageError::Repository(e) => e,
        }
    }
}

fn invalid(e: AppError) -> MessageError {
    match e {
        AppError::InvalidArgument(msg) => MessageError::InvalidArgument(msg),
        other => MessageError::Repository(other),
    }
}

/// Fields accepted when sending a message.
#[derive(Debug, Clone)]
pub struct SendMessageInput {
    pub group_id: i64,
    pub sender_id: i64,
    pub content: Option<String>,
    pub kind: MessageKind,
    pub file_url: Option<String>,
    pub reply_to_id: Option<i64>,
}

/// Send a message into an active chat group.
pub struct SendMessageUseCase<M: MessageRepository, G: ChatGroupRepository> {
    messages: Arc<M>,
    groups: Arc<G>,
}

impl<M: MessageRepository, G: ChatGroupRepository> SendMessageUseCase<M, G> {
    pub fn new(messages: Arc<M>, groups: Arc<G>) -> Self {
        Self { messages, groups }
    }

    pub async fn execute(&self, input: SendMessageInput) -> Result<Message, MessageError> {
        let group = self
            .groups
            .find_by_id(input.group_id)
            .await?
            .ok_or(MessageError::GroupNotFound)?;

        if !group.is_active {
            return Err(MessageError::InvalidArgument(
                "O grupo de chat está inativo".into(),
            ));
        }

        let message = Message {
            group_id: input.group_id,
            sender_id: input.sender_id,
            content: input.content,
            kind: input.kind,
            file_url: input.file_url,
            reply_to_id: input.reply_to_id,
            status: MessageStatus::Sent,
            ..Message::default()
        };

        message.validate().map_err(invalid)?;

        Ok(self.messages.create(&message).await?)
    }
}

/// Edit a text message owned by the sender.
pub struct EditMessageUseCase<M: MessageRepository> {
    messages: Arc<M>,
}

impl<M: MessageRepository> EditMessageUseCase<M> {
    pub fn new(messages: Arc<M>) -> Self {
        Self { messages }
    }

    pub async fn execute(
        &self,
        message_id: i64,
        sender_id: i64,
        content: String,
    ) -> Result<Message, MessageError> {
        let mut message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or(MessageError::NotFound)?;

        if message.sender_id != sender_id {
            return Err(MessageError::Forbidden);
        }

        message.edit(content).map_err(invalid)?;

        Ok(self.messages.update(&message).await?)
    }
}

/// Soft-delete a message owned by the sender.
pub struct DeleteMessageUseCase<M: MessageRepository> {
    messages: Arc<M>,
}

impl<M: MessageRepository> DeleteMessageUseCase<M> {
    pub fn new(messages: Arc<M>) -> Self {
        Self { messages }
    }

    pub async fn execute(&self, message_id: i64, sender_id: i64) -> Result<Message, MessageError> {
        let mut message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or(MessageError::NotFound)?;

        if message.sender_id != sender_id {
            return Err(MessageError::Forbidden);
        }

        message.soft_delete();

        Ok(self.messages.update(&message).await?)
    }
}

/// Advance a message's delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAdvance {
    Delivered,
    Read,
}

pub struct AdvanceMessageStatusUseCase<M: MessageRepository> {
    messages: Arc<M>,
}

impl<M: MessageRepository> AdvanceMessageStatusUseCase<M> {
    pub fn new(messages: Arc<M>) -> Self {
        Self { messages }
    }

    pub async fn execute(
        &self,
        message_id: i64,
        advance: StatusAdvance,
    ) -> Result<Message, MessageError> {
        let mut message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or(MessageError::NotFound)?;

        match advance {
            StatusAdvance::Delivered => message.mark_delivered(),
            StatusAdvance::Read => message.mark_read(),
        }

        Ok(self.messages.update(&message).await?)
    }
}

/// List a group's messages, newest first.
pub struct ListMessagesUseCase<M: MessageRepository, G: ChatGroupRepository> {
    messages: Arc<M>,
    groups: Arc<G>,
}

impl<M: MessageRepository, G: ChatGroupRepository> ListMessagesUseCase<M, G> {
    pub fn new(messages: Arc<M>, groups: Arc<G>) -> Self {
        Self { messages, groups }
    }

    pub async fn execute(
        &self,
        group_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<Page<Message>, MessageError> {
        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(MessageError::GroupNotFound);
        }

        Ok(self.messages.find_by_group(group_id, page, limit).await?)
    }
}

//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema. Messages are never
//! removed physically; deletion redacts the content and flags the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::Page;

/// Maximum message content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 4000;

/// Message kind matching the database VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
    Audio,
    Video,
}

impl MessageKind {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "image" => Self::Image,
            "file" => Self::File,
            "audio" => Self::Audio,
            "video" => Self::Video,
            _ => Self::Text,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::File => "file",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Media messages carry a file reference instead of text content.
    pub fn is_media(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery status, monotonically non-decreasing: sent -> delivered -> read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "delivered" => Self::Delivered,
            "read" => Self::Read,
            _ => Self::Sent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a message in a chat group.
///
/// Maps to the `messages` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - group_id: BIGINT NOT NULL REFERENCES chat_groups(id)
/// - sender_id: BIGINT NOT NULL REFERENCES users(id)
/// - content: TEXT NULL (max 4000 characters, NULL after deletion)
/// - kind: VARCHAR(10) NOT NULL DEFAULT 'text'
/// - file_url: TEXT NULL (required for media kinds)
/// - reply_to_id: BIGINT NULL REFERENCES messages(id)
/// - status: VARCHAR(10) NOT NULL DEFAULT 'sent'
/// - is_deleted: BOOLEAN NOT NULL DEFAULT FALSE
/// - edited_at / deleted_at: TIMESTAMPTZ NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub group_id: i64,
    pub sender_id: i64,
    pub content: Option<String>,
    pub kind: MessageKind,
    pub file_url: Option<String>,
    pub reply_to_id: Option<i64>,
    pub status: MessageStatus,
    pub is_deleted: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Validate the send invariants for this message.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.kind {
            MessageKind::Text => {
                let content = self.content.as_deref().unwrap_or("").trim();
                if content.is_empty() {
                    return Err(AppError::InvalidArgument(
                        "Mensagens de texto exigem conteúdo".into(),
                    ));
                }
            }
            _ => {
                if self.file_url.as_deref().unwrap_or("").is_empty() {
                    return Err(AppError::InvalidArgument(
                        "Mensagens de mídia exigem um arquivo".into(),
                    ));
                }
            }
        }
        if let Some(content) = &self.content {
            if content.chars().count() > MAX_CONTENT_LENGTH {
                return Err(AppError::InvalidArgument(
                    "A mensagem excede o limite de 4000 caracteres".into(),
                ));
            }
        }
        Ok(())
    }

    /// Advance to delivered. No-op unless the message is still `sent`.
    pub fn mark_delivered(&mut self) {
        if self.status == MessageStatus::Sent {
            self.status = MessageStatus::Delivered;
        }
    }

    /// Force the status to read regardless of the current state.
    pub fn mark_read(&mut self) {
        self.status = MessageStatus::Read;
    }

    /// Whether this message may still be edited. Only intact text messages
    /// are editable.
    pub fn is_editable(&self) -> bool {
        self.kind == MessageKind::Text && !self.is_deleted
    }

    /// Replace the text content and stamp the edit time.
    pub fn edit(&mut self, content: String) -> Result<(), AppError> {
        if !self.is_editable() {
            return Err(AppError::InvalidArgument(
                "Apenas mensagens de texto podem ser editadas".into(),
            ));
        }
        if content.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Mensagens de texto exigem conteúdo".into(),
            ));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(AppError::InvalidArgument(
                "A mensagem excede o limite de 4000 caracteres".into(),
            ));
        }
        self.content = Some(content);
        self.edited_at = Some(Utc::now());
        Ok(())
    }

    /// Soft-delete: keep the row, flag it and record when. The external
    /// representation redacts content and file_url (see the response DTO).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(Utc::now());
    }
}

impl Default for Message {
    fn default() -> Self {
        Self {
            id: 0,
            group_id: 0,
            sender_id: 0,
            content: None,
            kind: MessageKind::default(),
            file_url: None,
            reply_to_id: None,
            status: MessageStatus::default(),
            is_deleted: false,
            edited_at: None,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// Persist a new message.
    async fn create(&self, message: &Message) -> Result<Message, AppError>;

    /// Persist changes to an existing message.
    async fn update(&self, message: &Message) -> Result<Message, AppError>;

    /// List a group's messages, newest first, 1-indexed page.
    async fn find_by_group(
        &self,
        group_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<Page<Message>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(content: &str) -> Message {
        Message {
            id: 1,
            group_id: 10,
            sender_id: 20,
            content: Some(content.to_string()),
            ..Message::default()
        }
    }

    // ==========================================================================
    // Status state machine
    // ==========================================================================

    #[test]
    fn test_mark_delivered_from_sent() {
        let mut msg = text_message("oi");
        msg.mark_delivered();
        assert_eq!(msg.status, MessageStatus::Delivered);
    }

    #[test]
    fn test_mark_delivered_is_noop_from_delivered_and_read() {
        let mut msg = text_message("oi");
        msg.status = MessageStatus::Delivered;
        msg.mark_delivered();
        assert_eq!(msg.status, MessageStatus::Delivered);

        msg.status = MessageStatus::Read;
        msg.mark_delivered();
        assert_eq!(msg.status, MessageStatus::Read);
    }

    #[test]
    fn test_mark_read_forces_read_from_any_status() {
        for status in [
            MessageStatus::Sent,
            MessageStatus::Delivered,
            MessageStatus::Read,
        ] {
            let mut msg = text_message("oi");
            msg.status = status;
            msg.mark_read();
            assert_eq!(msg.status, MessageStatus::Read);
        }
    }

    // ==========================================================================
    // Validation
    // ==========================================================================

    #[test]
    fn test_text_message_requires_content() {
        let msg = text_message("");
        assert!(msg.validate().is_err());

        let mut msg = text_message("x");
        msg.content = None;
        assert!(msg.validate().is_err());
    }

    #[test]
    fn test_media_message_requires_file_url() {
        let mut msg = text_message("");
        msg.kind = MessageKind::Image;
        msg.content = None;
        assert!(msg.validate().is_err());

        msg.file_url = Some("https://cdn.example/foto.png".into());
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn test_content_over_4000_chars_rejected() {
        let msg = text_message(&"a".repeat(MAX_CONTENT_LENGTH + 1));
        assert!(msg.validate().is_err());

        let msg = text_message(&"a".repeat(MAX_CONTENT_LENGTH));
        assert!(msg.validate().is_ok());
    }

    // ==========================================================================
    // Edit rules
    // ==========================================================================

    #[test]
    fn test_only_text_messages_are_editable() {
        let mut msg = text_message("original");
        assert!(msg.edit("editada".into()).is_ok());
        assert_eq!(msg.content.as_deref(), Some("editada"));
        assert!(msg.edited_at.is_some());

        let mut media = text_message("");
        media.kind = MessageKind::Audio;
        media.file_url = Some("https://cdn.example/voz.ogg".into());
        assert!(media.edit("nope".into()).is_err());
    }

    #[test]
    fn test_deleted_message_is_not_editable() {
        let mut msg = text_message("oi");
        msg.soft_delete();
        assert!(msg.edit("de novo".into()).is_err());
    }

    // ==========================================================================
    // Soft delete
    // ==========================================================================

    #[test]
    fn test_soft_delete_retains_metadata() {
        let mut msg = text_message("segredo");
        msg.soft_delete();
        assert!(msg.is_deleted);
        assert!(msg.deleted_at.is_some());
        // Internal content is retained; redaction happens in the DTO.
        assert_eq!(msg.content.as_deref(), Some("segredo"));
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            MessageStatus::Sent,
            MessageStatus::Delivered,
            MessageStatus::Read,
        ] {
            assert_eq!(MessageStatus::from_str(status.as_str()), status);
        }
        assert_eq!(MessageStatus::from_str("bogus"), MessageStatus::Sent);
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            MessageKind::Text,
            MessageKind::Image,
            MessageKind::File,
            MessageKind::Audio,
            MessageKind::Video,
        ] {
            assert_eq!(MessageKind::from_str(kind.as_str()), kind);
        }
    }
}

//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait. Rows are never
//! deleted; soft deletion updates the flags in place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Message, MessageKind, MessageRepository, MessageStatus};
use crate::shared::error::AppError;
use crate::shared::pagination::{total_pages, Page};

/// Database row representation matching the messages table schema.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    group_id: i64,
    sender_id: i64,
    content: Option<String>,
    kind: String,
    file_url: Option<String>,
    reply_to_id: Option<i64>,
    status: String,
    is_deleted: bool,
    edited_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            group_id: self.group_id,
            sender_id: self.sender_id,
            content: self.content,
            kind: MessageKind::from_str(&self.kind),
            file_url: self.file_url,
            reply_to_id: self.reply_to_id,
            status: MessageStatus::from_str(&self.status),
            is_deleted: self.is_deleted,
            edited_at: self.edited_at,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, group_id, sender_id, content, kind, file_url, \
     reply_to_id, status, is_deleted, edited_at, deleted_at, created_at";

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MessageRow::into_message))
    }

    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            INSERT INTO messages (group_id, sender_id, content, kind, file_url,
                                  reply_to_id, status, is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(message.group_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .bind(message.kind.as_str())
        .bind(&message.file_url)
        .bind(message.reply_to_id)
        .bind(message.status.as_str())
        .bind(message.is_deleted)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_message())
    }

    async fn update(&self, message: &Message) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            UPDATE messages
            SET content = $2, status = $3, is_deleted = $4, edited_at = $5, deleted_at = $6
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(message.id)
        .bind(&message.content)
        .bind(message.status.as_str())
        .bind(message.is_deleted)
        .bind(message.edited_at)
        .bind(message.deleted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_message())
    }

    async fn find_by_group(
        &self,
        group_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<Page<Message>, AppError> {
        let offset = (page.max(1) - 1) * limit;

        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM messages
            WHERE group_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(group_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(MessageRow::into_message).collect(),
            total_pages: total_pages(total, limit),
        })
    }
}

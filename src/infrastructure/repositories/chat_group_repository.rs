//! Chat Group Repository Implementation
//!
//! PostgreSQL implementation of the ChatGroupRepository trait. Deactivation
//! is an UPDATE, never a DELETE.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{ChatGroup, ChatGroupKind, ChatGroupRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{total_pages, Page};

/// Database row representation matching the chat_groups table schema.
#[derive(Debug, sqlx::FromRow)]
struct ChatGroupRow {
    id: i64,
    name: String,
    description: Option<String>,
    kind: String,
    created_by: i64,
    is_active: bool,
    max_members: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatGroupRow {
    fn into_group(self) -> ChatGroup {
        ChatGroup {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: ChatGroupKind::from_str(&self.kind),
            created_by: self.created_by,
            is_active: self.is_active,
            max_members: self.max_members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, name, description, kind, created_by, is_active, max_members, created_at, updated_at";

/// PostgreSQL chat group repository implementation.
#[derive(Clone)]
pub struct PgChatGroupRepository {
    pool: PgPool,
}

impl PgChatGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatGroupRepository for PgChatGroupRepository {
    async fn find_all(&self, page: i64, limit: i64) -> Result<Page<ChatGroup>, AppError> {
        let offset = (page.max(1) - 1) * limit;

        let rows = sqlx::query_as::<_, ChatGroupRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM chat_groups WHERE is_active ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_groups WHERE is_active")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(ChatGroupRow::into_group).collect(),
            total_pages: total_pages(total, limit),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ChatGroup>, AppError> {
        let row = sqlx::query_as::<_, ChatGroupRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM chat_groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ChatGroupRow::into_group))
    }

    async fn create(&self, group: &ChatGroup) -> Result<ChatGroup, AppError> {
        let row = sqlx::query_as::<_, ChatGroupRow>(&format!(
            r#"
            INSERT INTO chat_groups (name, description, kind, created_by, is_active,
                                     max_members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.kind.as_str())
        .bind(group.created_by)
        .bind(group.is_active)
        .bind(group.max_members)
        .bind(group.created_at)
        .bind(group.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_group())
    }

    async fn deactivate(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE chat_groups SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

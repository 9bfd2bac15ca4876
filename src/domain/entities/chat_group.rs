//! Chat group entity and repository trait.
//!
//! Maps to the `chat_groups` table in the database schema. Chat groups are
//! never deleted physically; they are deactivated (soft delete).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::Page;

/// Chat group kind matching the database VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatGroupKind {
    #[default]
    Group,
    Direct,
}

impl ChatGroupKind {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "direct" => Self::Direct,
            _ => Self::Group,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Direct => "direct",
        }
    }
}

impl std::fmt::Display for ChatGroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a conversation space.
///
/// Maps to the `chat_groups` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL (at least 2 characters)
/// - description: TEXT NULL
/// - kind: VARCHAR(10) NOT NULL DEFAULT 'group'
/// - created_by: BIGINT NOT NULL REFERENCES users(id)
/// - is_active: BOOLEAN NOT NULL DEFAULT TRUE
/// - max_members: INTEGER NOT NULL (direct conversations hold exactly 2)
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Members and messages are related collections, not embedded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatGroup {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub kind: ChatGroupKind,
    pub created_by: i64,
    pub is_active: bool,
    pub max_members: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatGroup {
    /// Validate the create/update invariants for this group.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().chars().count() < 2 {
            return Err(AppError::InvalidArgument(
                "O nome do grupo deve ter pelo menos 2 caracteres".into(),
            ));
        }
        if self.kind == ChatGroupKind::Direct && self.max_members != 2 {
            return Err(AppError::InvalidArgument(
                "Conversas diretas devem ter exatamente 2 participantes".into(),
            ));
        }
        if self.max_members < 2 {
            return Err(AppError::InvalidArgument(
                "O grupo deve permitir pelo menos 2 participantes".into(),
            ));
        }
        Ok(())
    }

    /// Soft-deactivate the group.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

impl Default for ChatGroup {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: String::new(),
            description: None,
            kind: ChatGroupKind::default(),
            created_by: 0,
            is_active: true,
            max_members: 2,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for ChatGroup data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatGroupRepository: Send + Sync {
    /// List groups, 1-indexed page.
    async fn find_all(&self, page: i64, limit: i64) -> Result<Page<ChatGroup>, AppError>;

    /// Find a group by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<ChatGroup>, AppError>;

    /// Create a new group.
    async fn create(&self, group: &ChatGroup) -> Result<ChatGroup, AppError>;

    /// Mark a group inactive. Returns whether a row changed.
    async fn deactivate(&self, id: i64) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(kind: ChatGroupKind, name: &str, max_members: i32) -> ChatGroup {
        ChatGroup {
            name: name.to_string(),
            kind,
            max_members,
            created_by: 1,
            ..ChatGroup::default()
        }
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [ChatGroupKind::Group, ChatGroupKind::Direct] {
            assert_eq!(ChatGroupKind::from_str(kind.as_str()), kind);
        }
        assert_eq!(ChatGroupKind::from_str("unknown"), ChatGroupKind::Group);
    }

    #[test]
    fn test_default_is_active() {
        assert!(ChatGroup::default().is_active);
    }

    #[test]
    fn test_validate_rejects_short_name() {
        let g = group(ChatGroupKind::Group, "a", 10);
        assert!(matches!(g.validate(), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_trims_whitespace_before_length_check() {
        let g = group(ChatGroupKind::Group, "  a  ", 10);
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_direct_group_requires_exactly_two_members() {
        let g = group(ChatGroupKind::Direct, "dm", 3);
        assert!(g.validate().is_err());

        let g = group(ChatGroupKind::Direct, "dm", 2);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_deactivate_flips_flag_and_stamps_update() {
        let mut g = group(ChatGroupKind::Group, "carona centro", 5);
        let before = g.updated_at;
        g.deactivate();
        assert!(!g.is_active);
        assert!(g.updated_at >= before);
    }
}

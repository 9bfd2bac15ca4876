//! Chat group use cases.
//!
//! Chat groups are soft-deactivated, never physically deleted.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{ChatGroup, ChatGroupKind, ChatGroupRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::Page;

/// Chat group use-case errors
#[derive(Debug, thiserror::Error)]
pub enum ChatGroupError {
    #[error("Chat group not found")]
    NotFound,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Deactivation failed")]
    DeactivationFailed,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<ChatGroupError> for AppError {
    fn from(err: ChatGroupError) -> Self {
        match err {
            ChatGroupError::NotFound => AppError::NotFound("Grupo de chat não encontrado".into()),
            ChatGroupError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            ChatGroupError::DeactivationFailed => AppError::DeletionFailed,
            ChatGroupError::Repository(e) => e,
        }
    }
}

/// Fields accepted when creating a chat group.
#[derive(Debug, Clone)]
pub struct CreateChatGroupInput {
    pub name: String,
    pub description: Option<String>,
    pub kind: ChatGroupKind,
    pub created_by: i64,
    pub max_members: Option<i32>,
}

/// Create a chat group after running the entity's invariant checks.
pub struct CreateChatGroupUseCase<R: ChatGroupRepository> {
    repo: Arc<R>,
}

impl<R: ChatGroupRepository> CreateChatGroupUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateChatGroupInput) -> Result<ChatGroup, ChatGroupError> {
        let now = Utc::now();
        let max_members = match input.kind {
            // Direct conversations always hold exactly two participants.
            ChatGroupKind::Direct => 2,
            ChatGroupKind::Group => input.max_members.unwrap_or(50),
        };

        let group = ChatGroup {
            id: 0,
            name: input.name,
            description: input.description,
            kind: input.kind,
            created_by: input.created_by,
            is_active: true,
            max_members,
            created_at: now,
            updated_at: now,
        };

        group.validate().map_err(|e| match e {
            AppError::InvalidArgument(msg) => ChatGroupError::InvalidArgument(msg),
            other => ChatGroupError::Repository(other),
        })?;

        Ok(self.repo.create(&group).await?)
    }
}

/// Fetch a chat group by id.
pub struct GetChatGroupUseCase<R: ChatGroupRepository> {
    repo: Arc<R>,
}

impl<R: ChatGroupRepository> GetChatGroupUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> Result<ChatGroup, ChatGroupError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ChatGroupError::NotFound)
    }
}

/// List chat groups.
pub struct ListChatGroupsUseCase<R: ChatGroupRepository> {
    repo: Arc<R>,
}

impl<R: ChatGroupRepository> ListChatGroupsUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, page: i64, limit: i64) -> Result<Page<ChatGroup>, ChatGroupError> {
        Ok(self.repo.find_all(page, limit).await?)
    }
}

/// Soft-deactivate a chat group.
pub struct DeactivateChatGroupUseCase<R: ChatGroupRepository> {
    repo: Arc<R>,
}

impl<R: ChatGroupRepository> DeactivateChatGroupUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> Result<(), ChatGroupError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ChatGroupError::NotFound);
        }

        if !self.repo.deactivate(id).await? {
            return Err(ChatGroupError::DeactivationFailed);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockChatGroupRepository;

    fn create_input(kind: ChatGroupKind, name: &str) -> CreateChatGroupInput {
        CreateChatGroupInput {
            name: name.into(),
            description: None,
            kind,
            created_by: 1,
            max_members: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_short_name_without_persisting() {
        let mut repo = MockChatGroupRepository::new();
        repo.expect_create().never();

        let use_case = CreateChatGroupUseCase::new(Arc::new(repo));
        let result = use_case
            .execute(create_input(ChatGroupKind::Group, "x"))
            .await;

        assert!(matches!(result, Err(ChatGroupError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_create_direct_group_pins_two_members() {
        let mut repo = MockChatGroupRepository::new();
        repo.expect_create().returning(|group| Ok(group.clone()));

        let use_case = CreateChatGroupUseCase::new(Arc::new(repo));
        let group = use_case
            .execute(create_input(ChatGroupKind::Direct, "conversa"))
            .await
            .unwrap();

        assert_eq!(group.max_members, 2);
        assert!(group.is_active);
    }

    #[tokio::test]
    async fn test_deactivate_missing_group_is_not_found() {
        let mut repo = MockChatGroupRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_deactivate().never();

        let use_case = DeactivateChatGroupUseCase::new(Arc::new(repo));
        assert!(matches!(
            use_case.execute(3).await,
            Err(ChatGroupError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_deactivate_reporting_no_rows_fails() {
        let mut repo = MockChatGroupRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok(Some(ChatGroup {
                id,
                name: "carona centro".into(),
                created_by: 1,
                max_members: 5,
                ..ChatGroup::default()
            }))
        });
        repo.expect_deactivate().returning(|_| Ok(false));

        let use_case = DeactivateChatGroupUseCase::new(Arc::new(repo));
        assert!(matches!(
            use_case.execute(3).await,
            Err(ChatGroupError::DeactivationFailed)
        ));
    }
}

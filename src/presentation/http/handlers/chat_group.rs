//! Chat Group Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::CreateChatGroupRequest;
use crate::application::dto::response::{ChatGroupResponse, Data, PageResponse};
use crate::application::use_cases::{
    CreateChatGroupInput, CreateChatGroupUseCase, DeactivateChatGroupUseCase, GetChatGroupUseCase,
    ListChatGroupsUseCase,
};
use crate::domain::entities::ChatGroupKind;
use crate::infrastructure::repositories::PgChatGroupRepository;
use crate::presentation::http::extractors::{ValidatedJson, ValidatedQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::pagination::PageRequest;
use crate::startup::AppState;

/// List active chat groups, paginated
pub async fn list_chat_groups(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageRequest>,
) -> Result<Json<Data<PageResponse<ChatGroupResponse>>>, AppError> {
    let repo = Arc::new(PgChatGroupRepository::new(state.db.clone()));
    let use_case = ListChatGroupsUseCase::new(repo);

    let page = use_case
        .execute(query.page(), query.limit())
        .await
        .map_err(AppError::from)?;

    Ok(Json(Data::new(PageResponse::from_page(
        page,
        ChatGroupResponse::from,
    ))))
}

/// Create a chat group owned by the authenticated user
pub async fn create_chat_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateChatGroupRequest>,
) -> Result<(StatusCode, Json<Data<ChatGroupResponse>>), AppError> {
    let repo = Arc::new(PgChatGroupRepository::new(state.db.clone()));
    let use_case = CreateChatGroupUseCase::new(repo);

    let kind = body
        .kind
        .as_deref()
        .map(ChatGroupKind::from_str)
        .unwrap_or(ChatGroupKind::Group);

    let input = CreateChatGroupInput {
        name: body.name,
        description: body.description,
        kind,
        created_by: user.id,
        max_members: body.max_members,
    };

    let group = use_case.execute(input).await.map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(Data::new(ChatGroupResponse::from(group))),
    ))
}

/// Get a chat group by ID
pub async fn get_chat_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<Json<Data<ChatGroupResponse>>, AppError> {
    let repo = Arc::new(PgChatGroupRepository::new(state.db.clone()));
    let use_case = GetChatGroupUseCase::new(repo);

    let group = use_case.execute(group_id).await.map_err(AppError::from)?;

    Ok(Json(Data::new(ChatGroupResponse::from(group))))
}

/// Deactivate a chat group (soft delete)
pub async fn deactivate_chat_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let repo = Arc::new(PgChatGroupRepository::new(state.db.clone()));
    let use_case = DeactivateChatGroupUseCase::new(repo);

    use_case.execute(group_id).await.map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

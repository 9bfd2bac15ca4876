//! Message Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::{EditMessageRequest, SendMessageRequest};
use crate::application::dto::response::{Data, MessageResponse, PageResponse};
use crate::application::use_cases::{
    AdvanceMessageStatusUseCase, DeleteMessageUseCase, EditMessageUseCase, ListMessagesUseCase,
    SendMessageInput, SendMessageUseCase, StatusAdvance,
};
use crate::domain::entities::MessageKind;
use crate::infrastructure::repositories::{PgChatGroupRepository, PgMessageRepository};
use crate::presentation::http::extractors::{ValidatedJson, ValidatedQuery};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::pagination::PageRequest;
use crate::startup::AppState;

/// List messages in a chat group, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    ValidatedQuery(query): ValidatedQuery<PageRequest>,
) -> Result<Json<Data<PageResponse<MessageResponse>>>, AppError> {
    let messages = Arc::new(PgMessageRepository::new(state.db.clone()));
    let groups = Arc::new(PgChatGroupRepository::new(state.db.clone()));
    let use_case = ListMessagesUseCase::new(messages, groups);

    let page = use_case
        .execute(group_id, query.page(), query.limit())
        .await
        .map_err(AppError::from)?;

    Ok(Json(Data::new(PageResponse::from_page(
        page,
        MessageResponse::from,
    ))))
}

/// Send a message to a chat group
pub async fn send_message(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<Data<MessageResponse>>), AppError> {
    let messages = Arc::new(PgMessageRepository::new(state.db.clone()));
    let groups = Arc::new(PgChatGroupRepository::new(state.db.clone()));
    let use_case = SendMessageUseCase::new(messages, groups);

    let kind = body
        .kind
        .as_deref()
        .map(MessageKind::from_str)
        .unwrap_or(MessageKind::Text);

    let input = SendMessageInput {
        group_id,
        sender_id: user.id,
        content: body.content,
        kind,
        file_url: body.file_url,
        reply_to_id: body.reply_to_id,
    };

    let message = use_case.execute(input).await.map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(Data::new(MessageResponse::from(message))),
    ))
}

/// Edit a text message; only the sender may edit
pub async fn edit_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<EditMessageRequest>,
) -> Result<Json<Data<MessageResponse>>, AppError> {
    let messages = Arc::new(PgMessageRepository::new(state.db.clone()));
    let use_case = EditMessageUseCase::new(messages);

    let message = use_case
        .execute(message_id, user.id, body.content)
        .await
        .map_err(AppError::from)?;

    Ok(Json(Data::new(MessageResponse::from(message))))
}

/// Soft delete a message; only the sender may delete
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    let messages = Arc::new(PgMessageRepository::new(state.db.clone()));
    let use_case = DeleteMessageUseCase::new(messages);

    use_case
        .execute(message_id, user.id)
        .await
        .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Mark a message as delivered
pub async fn mark_delivered(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Json<Data<MessageResponse>>, AppError> {
    advance_status(state, message_id, StatusAdvance::Delivered).await
}

/// Mark a message as read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Json<Data<MessageResponse>>, AppError> {
    advance_status(state, message_id, StatusAdvance::Read).await
}

async fn advance_status(
    state: AppState,
    message_id: i64,
    advance: StatusAdvance,
) -> Result<Json<Data<MessageResponse>>, AppError> {
    let messages = Arc::new(PgMessageRepository::new(state.db.clone()));
    let use_case = AdvanceMessageStatusUseCase::new(messages);

    let message = use_case
        .execute(message_id, advance)
        .await
        .map_err(AppError::from)?;

    Ok(Json(Data::new(MessageResponse::from(message))))
}

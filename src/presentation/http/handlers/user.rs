//! User Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::{Data, PageResponse, UserResponse};
use crate::application::use_cases::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::http::extractors::{ValidatedJson, ValidatedQuery};
use crate::shared::error::AppError;
use crate::shared::pagination::PageRequest;
use crate::startup::AppState;

/// List users (paginated, 1-indexed)
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PageRequest>,
) -> Result<Json<Data<PageResponse<UserResponse>>>, AppError> {
    let repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let use_case = ListUsersUseCase::new(repo);

    let page = use_case
        .execute(query.page(), query.limit())
        .await
        .map_err(AppError::from)?;

    Ok(Json(Data::new(PageResponse::from_page(
        page,
        UserResponse::from,
    ))))
}

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Data<UserResponse>>), AppError> {
    let repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let use_case = CreateUserUseCase::new(repo);

    let input = CreateUserInput {
        name: body.name,
        last_name: body.last_name,
        email: body.email,
        password: body.password,
        cpf: body.cpf,
        phone: body.phone,
        address: body.address,
        city: body.city,
        state: body.state,
        is_driver: body.is_driver,
        is_passenger: body.is_passenger,
    };

    let user = use_case.execute(input).await.map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(Data::new(UserResponse::from(user))),
    ))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Data<UserResponse>>, AppError> {
    let repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let use_case = GetUserUseCase::new(repo);

    let user = use_case.execute(user_id).await.map_err(AppError::from)?;

    Ok(Json(Data::new(UserResponse::from(user))))
}

/// Update a user
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Data<UserResponse>>, AppError> {
    let repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let use_case = UpdateUserUseCase::new(repo);

    let input = UpdateUserInput {
        name: body.name,
        last_name: body.last_name,
        email: body.email,
        password: body.password,
        phone: body.phone,
        address: body.address,
        city: body.city,
        state: body.state,
    };

    let user = use_case
        .execute(user_id, input)
        .await
        .map_err(AppError::from)?;

    Ok(Json(Data::new(UserResponse::from(user))))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let use_case = DeleteUserUseCase::new(repo);

    use_case.execute(user_id).await.map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

//! Ride Group Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CreateRideGroupRequest;
use crate::application::dto::response::{Data, RideGroupResponse};
use crate::application::use_cases::{
    CreateRideGroupInput, CreateRideGroupUseCase, GetRideGroupUseCase,
};
use crate::infrastructure::repositories::PgRideGroupRepository;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create a ride group
pub async fn create_ride_group(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateRideGroupRequest>,
) -> Result<(StatusCode, Json<Data<RideGroupResponse>>), AppError> {
    let repo = Arc::new(PgRideGroupRepository::new(state.db.clone()));
    let use_case = CreateRideGroupUseCase::new(repo);

    let input = CreateRideGroupInput {
        name: body.name,
        driver_id: body.driver_id,
        member_ids: body.members,
    };

    let group = use_case.execute(input).await.map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(Data::new(RideGroupResponse::from(group))),
    ))
}

/// Get a ride group by ID
pub async fn get_ride_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> Result<Json<Data<RideGroupResponse>>, AppError> {
    let repo = Arc::new(PgRideGroupRepository::new(state.db.clone()));
    let use_case = GetRideGroupUseCase::new(repo);

    let group = use_case.execute(group_id).await.map_err(AppError::from)?;

    Ok(Json(Data::new(RideGroupResponse::from(group))))
}

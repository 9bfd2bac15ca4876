//! Ride group use cases.
//!
//! Validates the ride group invariants (name, driver, 1-5 passengers) before
//! delegating to the repository.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{RideGroup, RideGroupRepository, MAX_RIDE_MEMBERS};
use crate::shared::error::AppError;

/// Ride group use-case errors
#[derive(Debug, thiserror::Error)]
pub enum RideGroupError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ride group not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<RideGroupError> for AppError {
    fn from(err: RideGroupError) -> Self {
        match err {
            RideGroupError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            RideGroupError::NotFound => AppError::NotFound("Grupo não encontrado".into()),
            RideGroupError::Repository(e) => e,
        }
    }
}

/// Fields accepted when creating a ride group.
#[derive(Debug, Clone)]
pub struct CreateRideGroupInput {
    pub name: String,
    pub driver_id: Option<i64>,
    pub member_ids: Vec<i64>,
}

/// Create a ride group after checking the domain invariants.
pub struct CreateRideGroupUseCase<R: RideGroupRepository> {
    repo: Arc<R>,
}

impl<R: RideGroupRepository> CreateRideGroupUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateRideGroupInput) -> Result<RideGroup, RideGroupError> {
        if input.name.trim().is_empty() {
            return Err(RideGroupError::InvalidArgument(
                "O nome do grupo é obrigatório".into(),
            ));
        }

        let driver_id = input.driver_id.ok_or_else(|| {
            RideGroupError::InvalidArgument("O motorista é obrigatório".into())
        })?;

        if input.member_ids.is_empty() || input.member_ids.len() > MAX_RIDE_MEMBERS {
            return Err(RideGroupError::InvalidArgument(
                "O grupo deve ter entre 1 e 5 participantes".into(),
            ));
        }

        let group = RideGroup {
            id: 0,
            name: input.name,
            driver_id,
            member_ids: input.member_ids,
            created_at: Utc::now(),
        };

        Ok(self.repo.create(&group).await?)
    }
}

/// Fetch a ride group by id.
pub struct GetRideGroupUseCase<R: RideGroupRepository> {
    repo: Arc<R>,
}

impl<R: RideGroupRepository> GetRideGroupUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> Result<RideGroup, RideGroupError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RideGroupError::NotFound)
    }
}

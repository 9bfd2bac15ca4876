//! Ride group entity and repository trait.
//!
//! Maps to the `ride_groups` and `ride_group_members` tables. A ride group
//! ties a driver to the passengers sharing a ride.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Maximum passengers per ride group.
pub const MAX_RIDE_MEMBERS: usize = 5;

/// Represents a ride group.
///
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - driver_id: BIGINT NOT NULL REFERENCES users(id)
/// - member_ids: rows in `ride_group_members` (1 to 5 passengers)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideGroup {
    pub id: i64,
    pub name: String,
    pub driver_id: i64,
    pub member_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl Default for RideGroup {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            driver_id: 0,
            member_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for RideGroup data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideGroupRepository: Send + Sync {
    /// Persist a new ride group and its membership rows.
    async fn create(&self, group: &RideGroup) -> Result<RideGroup, AppError>;

    /// Find a ride group by primary key, with its members.
    async fn find_by_id(&self, id: i64) -> Result<Option<RideGroup>, AppError>;
}

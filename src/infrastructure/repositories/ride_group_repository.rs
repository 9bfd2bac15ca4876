//! Ride Group Repository Implementation
//!
//! PostgreSQL implementation of the RideGroupRepository trait. The group row
//! and its membership rows are written in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{RideGroup, RideGroupRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct RideGroupRow {
    id: i64,
    name: String,
    driver_id: i64,
    created_at: DateTime<Utc>,
}

/// PostgreSQL ride group repository implementation.
#[derive(Clone)]
pub struct PgRideGroupRepository {
    pool: PgPool,
}

impl PgRideGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideGroupRepository for PgRideGroupRepository {
    async fn create(&self, group: &RideGroup) -> Result<RideGroup, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RideGroupRow>(
            r#"
            INSERT INTO ride_groups (name, driver_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, driver_id, created_at
            "#,
        )
        .bind(&group.name)
        .bind(group.driver_id)
        .bind(group.created_at)
        .fetch_one(&mut *tx)
        .await?;

        for member_id in &group.member_ids {
            sqlx::query("INSERT INTO ride_group_members (group_id, user_id) VALUES ($1, $2)")
                .bind(row.id)
                .bind(member_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(RideGroup {
            id: row.id,
            name: row.name,
            driver_id: row.driver_id,
            member_ids: group.member_ids.clone(),
            created_at: row.created_at,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RideGroup>, AppError> {
        let row = sqlx::query_as::<_, RideGroupRow>(
            "SELECT id, name, driver_id, created_at FROM ride_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let member_ids: Vec<i64> = sqlx::query_scalar(
            "SELECT user_id FROM ride_group_members WHERE group_id = $1 ORDER BY user_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(RideGroup {
            id: row.id,
            name: row.name,
            driver_id: row.driver_id,
            member_ids,
            created_at: row.created_at,
        }))
    }
}

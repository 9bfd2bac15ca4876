//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{total_pages, Page};

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    last_name: String,
    email: String,
    password_hash: String,
    cpf: String,
    phone: String,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    is_driver: bool,
    is_passenger: bool,
    verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            cpf: self.cpf,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            is_driver: self.is_driver,
            is_passenger: self.is_passenger,
            verified: self.verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, last_name, email, password_hash, cpf, phone, \
     address, city, state, is_driver, is_passenger, verified, created_at, updated_at";

/// PostgreSQL user repository implementation.
///
/// Provides CRUD operations for users against a PostgreSQL database.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self, page: i64, limit: i64) -> Result<Page<User>, AppError> {
        let offset = (page.max(1) - 1) * limit;

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            items: rows.into_iter().map(UserRow::into_user).collect(),
            total_pages: total_pages(total, limit),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, last_name, email, password_hash, cpf, phone,
                               address, city, state, is_driver, is_passenger, verified,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.cpf)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.state)
        .bind(user.is_driver)
        .bind(user.is_passenger)
        .bind(user.verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_user())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, last_name = $3, email = $4, password_hash = $5,
                cpf = $6, phone = $7, address = $8, city = $9, state = $10,
                is_driver = $11, is_passenger = $12, verified = $13, updated_at = $14
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.cpf)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.state)
        .bind(user.is_driver)
        .bind(user.is_passenger)
        .bind(user.verified)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_user())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

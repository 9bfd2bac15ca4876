//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::shared::pagination::Page;

/// Represents a user account on the ride chat platform.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - last_name: VARCHAR(100) NOT NULL
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - cpf: VARCHAR(14) NOT NULL
/// - phone: VARCHAR(20) NOT NULL
/// - address, city, state: nullable address fields
/// - is_driver / is_passenger: BOOLEAN NOT NULL DEFAULT FALSE
/// - verified: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database-generated primary key
    pub id: i64,

    /// First name
    pub name: String,

    /// Last name
    pub last_name: String,

    /// Email address (unique, enforced at the use-case layer before insert)
    pub email: String,

    /// Argon2 password hash; the plaintext is never stored
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Brazilian taxpayer number
    pub cpf: String,

    /// Contact phone
    pub phone: String,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    /// Whether the account can drive rides
    pub is_driver: bool,

    /// Whether the account can join rides as a passenger
    pub is_passenger: bool,

    /// Account verification flag, false until verified
    pub verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            cpf: String::new(),
            phone: String::new(),
            address: None,
            city: None,
            state: None,
            is_driver: false,
            is_passenger: false,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users, 1-indexed page.
    async fn find_all(&self, page: i64, limit: i64) -> Result<Page<User>, AppError>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Create a new user in the database.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Update an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user by ID. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

//! User use cases.
//!
//! Single-operation orchestrators for user management: create, update,
//! delete, get, and list. Email uniqueness is enforced here before touching
//! the repository, and passwords are Argon2-hashed before persistence.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::Page;

/// User use-case errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already registered")]
    EmailConflict,

    #[error("Deletion failed")]
    DeletionFailed,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound("Usuário não encontrado".into()),
            UserError::EmailConflict => AppError::EmailConflict,
            UserError::DeletionFailed => AppError::DeletionFailed,
            UserError::Hash(msg) => AppError::Internal(msg),
            UserError::Repository(e) => e,
        }
    }
}

/// Hash a password using Argon2id with a fresh random salt.
///
/// Two calls with the same input produce different hashes; both verify
/// against the original plaintext.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::Hash(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, UserError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::Hash(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_driver: bool,
    pub is_passenger: bool,
}

/// Fields accepted when updating a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Create a user, rejecting duplicate emails before persistence.
pub struct CreateUserUseCase<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateUserInput) -> Result<User, UserError> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::EmailConflict);
        }

        let password_hash = hash_password(&input.password)?;
        let now = Utc::now();

        let user = User {
            id: 0,
            name: input.name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            cpf: input.cpf,
            phone: input.phone,
            address: input.address,
            city: input.city,
            state: input.state,
            is_driver: input.is_driver,
            is_passenger: input.is_passenger,
            verified: false,
            created_at: now,
            updated_at: now,
        };

        Ok(self.repo.create(&user).await?)
    }
}

/// Update a user, guarding id existence and email collisions.
pub struct UpdateUserUseCase<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64, input: UpdateUserInput) -> Result<User, UserError> {
        let mut user = self.repo.find_by_id(id).await?.ok_or(UserError::NotFound)?;

        if let Some(new_email) = input.email {
            if new_email != user.email {
                if let Some(existing) = self.repo.find_by_email(&new_email).await? {
                    if existing.id != id {
                        return Err(UserError::EmailConflict);
                    }
                }
                user.email = new_email;
            }
        }

        if let Some(password) = input.password {
            user.password_hash = hash_password(&password)?;
        }

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = input.phone {
            user.phone = phone;
        }
        if let Some(address) = input.address {
            user.address = Some(address);
        }
        if let Some(city) = input.city {
            user.city = Some(city);
        }
        if let Some(state) = input.state {
            user.state = Some(state);
        }

        user.updated_at = Utc::now();

        Ok(self.repo.update(&user).await?)
    }
}

/// Delete a user by id. Deletion is physical, gated on an existence check.
pub struct DeleteUserUseCase<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> Result<(), UserError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(UserError::NotFound);
        }

        if !self.repo.delete(id).await? {
            return Err(UserError::DeletionFailed);
        }

        Ok(())
    }
}

/// Fetch a single user by id.
pub struct GetUserUseCase<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> Result<User, UserError> {
        self.repo.find_by_id(id).await?.ok_or(UserError::NotFound)
    }
}

/// List users, delegating pagination entirely to the repository.
pub struct ListUsersUseCase<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, page: i64, limit: i64) -> Result<Page<User>, UserError> {
        Ok(self.repo.find_all(page, limit).await?)
    }
}

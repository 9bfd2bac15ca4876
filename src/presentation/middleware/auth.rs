//! Authentication Middleware
//!
//! JWT validation middleware for protected routes. Downstream handlers read
//! the caller identity from the `AuthUser` request extension exclusively.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::shared::error::AppError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Whether the account can drive rides
    pub is_driver: bool,
    /// Whether the account can join rides as a passenger
    pub is_passenger: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_driver: bool,
    pub is_passenger: bool,
}

/// Sign an access token for the given identity.
pub fn issue_token(
    user: &AuthUser,
    settings: &JwtSettings,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        is_driver: user.is_driver,
        is_passenger: user.is_passenger,
        exp: (now + Duration::minutes(settings.access_token_expiry_minutes)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
}

/// Authentication middleware that validates JWT bearer tokens.
pub async fn auth_middleware(
    State(settings): State<JwtSettings>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header missing".into()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    if token.trim().is_empty() {
        return Err(AppError::Unauthorized("Empty bearer token".into()));
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".into())
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidToken => {
            AppError::Unauthorized("Invalid token".into())
        }
        _ => AppError::Unauthorized(e.to_string()),
    })?;

    let claims = token_data.claims;
    let id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

    request.extensions_mut().insert(AuthUser {
        id,
        email: claims.email,
        name: claims.name,
        is_driver: claims.is_driver,
        is_passenger: claims.is_passenger,
    });

    Ok(next.run(request).await)
}

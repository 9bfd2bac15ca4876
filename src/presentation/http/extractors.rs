//! Custom Extractors
//!
//! Validated request extractors. Both collect every field error (no early
//! abort) and reject with the 400 contract
//! `{message: "<n> erro(s) ocorreram", errors: [...]}`.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::shared::error::AppError;

/// JSON body validated against the DTO's schema.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(vec![format!("Corpo inválido: {}", e.body_text())]))?;

        value.validate().map_err(collect_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// Query string validated against the DTO's schema.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(vec![format!("Parâmetros inválidos: {}", e)]))?;

        value.validate().map_err(collect_errors)?;

        Ok(ValidatedQuery(value))
    }
}

/// Flatten all field errors into "campo: mensagem" strings, sorted for a
/// stable response order.
fn collect_errors(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("valor inválido ({})", e.code));
                format!("{}: {}", field, detail)
            })
        })
        .collect();
    messages.sort();

    AppError::Validation(messages)
}

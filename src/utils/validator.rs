//! # Request Body Validation
//!
//! [`ValidatedJson`] replaces `axum::Json` on endpoints that accept input. It
//! deserializes the body, runs the type's `validator` constraints, and rejects
//! with an unprocessable-entity [`AppError`] so that malformed input is always
//! distinguishable from valid-but-rejected input.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that also enforces `T`'s validation rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "Request body could not be parsed");
            AppError::from(e)
        })?;

        value.validate().map_err(|e| {
            debug!(error = %e, "Request body failed validation");
            AppError::from(e)
        })?;

        Ok(Self(value))
    }
}

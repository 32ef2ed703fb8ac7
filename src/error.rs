//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! Handlers and middleware never build failure responses themselves: they return
//! an [`AppError`], and its [`IntoResponse`] implementation is the single place
//! that decides the status code and the JSON body sent to the client.
//!
//! ## Error Response Format
//!
//! Every failure, typed or not, is rendered the same way:
//!
//! ```json
//! {
//!   "message": "User already exists",
//!   "errorCode": 1002,
//!   "errors": null
//! }
//! ```
//!
//! Failures that do not belong to the closed [`ErrorCode`] registry (database
//! outages, hashing failures, panics) are logged in full and downgraded to a
//! generic `2001` response so that no internal detail reaches the client.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::services::jwt::TokenError;
use crate::services::store::StoreError;

/// Message sent to clients for every failure outside the typed registry.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Closed registry of error codes surfaced to clients.
///
/// Serialized as its bare integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    UserNotFound = 1001,
    UserAlreadyExists = 1002,
    AllFieldsRequired = 1003,
    Unauthorized = 1004,
    InvalidPassword = 1005,
    InternalServerError = 2001,
    UnprocessableEntity = 2002,
}

impl ErrorCode {
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

/// Central application error type that encompasses all possible error conditions.
///
/// The first five variants are the typed kinds: each one is bound to a fixed
/// HTTP status and carries a code from [`ErrorCode`]. The remaining variants wrap
/// failures from collaborators and always render as `500` / `2001`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound {
        message: &'static str,
        code: ErrorCode,
    },

    #[error("bad request: {message}")]
    BadRequest {
        message: &'static str,
        code: ErrorCode,
    },

    #[error("unauthorized: {message}")]
    Unauthorized {
        message: &'static str,
        code: ErrorCode,
    },

    #[error("unprocessable entity: {message}")]
    UnprocessableEntity {
        message: String,
        errors: Option<Value>,
    },

    /// Request matched no route or no method. Carries the generic code since the
    /// registry has no routing entry.
    #[error("no route: {message}")]
    NoRoute {
        status: StatusCode,
        message: &'static str,
    },

    /// Typed internal failure. Any structured detail is dropped before rendering.
    #[error("internal server error: {message}")]
    Internal { message: &'static str },

    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("password hashing error")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token error")]
    Token(#[from] TokenError),

    #[error("blocking task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn user_not_found() -> Self {
        Self::NotFound {
            message: "User not found",
            code: ErrorCode::UserNotFound,
        }
    }

    pub fn user_already_exists() -> Self {
        Self::BadRequest {
            message: "User already exists",
            code: ErrorCode::UserAlreadyExists,
        }
    }

    pub fn all_fields_required() -> Self {
        Self::BadRequest {
            message: "All fields are required",
            code: ErrorCode::AllFieldsRequired,
        }
    }

    pub fn invalid_password() -> Self {
        Self::BadRequest {
            message: "Invalid password",
            code: ErrorCode::InvalidPassword,
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "Unauthorized",
            code: ErrorCode::Unauthorized,
        }
    }

    pub fn unprocessable(message: impl Into<String>, errors: Option<Value>) -> Self {
        Self::UnprocessableEntity {
            message: message.into(),
            errors,
        }
    }

    pub fn route_not_found() -> Self {
        Self::NoRoute {
            status: StatusCode::NOT_FOUND,
            message: "Route not found",
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::NoRoute {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method not allowed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoRoute { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. }
            | Self::BadRequest { code, .. }
            | Self::Unauthorized { code, .. } => *code,
            Self::UnprocessableEntity { .. } => ErrorCode::UnprocessableEntity,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// Builds the body sent to the client. Never includes text from wrapped errors.
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::NotFound { message, code }
            | Self::BadRequest { message, code }
            | Self::Unauthorized { message, code } => ErrorBody {
                message: (*message).to_string(),
                error_code: *code,
                errors: None,
            },
            Self::UnprocessableEntity { message, errors } => ErrorBody {
                message: message.clone(),
                error_code: ErrorCode::UnprocessableEntity,
                errors: errors.clone(),
            },
            Self::NoRoute { message, .. } | Self::Internal { message } => ErrorBody {
                message: (*message).to_string(),
                error_code: ErrorCode::InternalServerError,
                errors: None,
            },
            _ => ErrorBody::generic(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            // The unique index on email is the authoritative duplicate check.
            StoreError::Conflict => Self::user_already_exists(),
            StoreError::Database(e) => Self::Db(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::unprocessable(
            "Unprocessable entity",
            Some(json!({ "body": rejection.body_text() })),
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::unprocessable("Unprocessable entity", serde_json::to_value(&errors).ok())
    }
}

/// Uniform JSON error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub error_code: ErrorCode,
    pub errors: Option<Value>,
}

impl ErrorBody {
    fn generic() -> Self {
        Self {
            message: GENERIC_ERROR_MESSAGE.to_string(),
            error_code: ErrorCode::InternalServerError,
            errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full detail stays server-side
        if status.is_server_error() {
            error!(error = ?self, "Request failed with internal error");
        } else {
            warn!(error = %self, code = self.error_code().as_u16(), "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Renders a handler panic as the generic internal error.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`, so a
/// panic anywhere in the request pipeline still produces the uniform body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::generic()),
    )
        .into_response()
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;

//! # Fallback Handlers
//!
//! Requests that match no route, or a route with the wrong method, still get
//! the uniform error body instead of axum's empty default responses.

use tracing::{debug, instrument};

use crate::error::AppError;

#[instrument]
pub async fn route_not_found() -> AppError {
    debug!("No route matched");
    AppError::route_not_found()
}

#[instrument]
pub async fn method_not_allowed() -> AppError {
    debug!("Route matched with unsupported method");
    AppError::method_not_allowed()
}

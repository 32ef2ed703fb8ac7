//! # Health Check Handler
//!
//! Root endpoint used by load balancers and deployment tooling to verify that
//! the application is up. It performs no store checks.

use tracing::{debug, instrument};

/// Always answers `200 OK` with the plain-text body `Working`.
#[instrument]
pub async fn health_check() -> &'static str {
    debug!("Health check endpoint accessed");
    "Working"
}

//! # Application Constants
//!
//! This module defines configuration constants used throughout the application.

use std::time::Duration;

/// Expiration time for JWT access tokens
///
/// There is no refresh flow; clients log in again once a token expires.
pub const ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(60 * 60);

/// Request header carrying the raw access token on protected routes
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// bcrypt work factor used when `BCRYPT_COST` is not set
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Port the server listens on when `PORT` is not set
pub const DEFAULT_PORT: u16 = 8090;

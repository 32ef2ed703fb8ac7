//! # HTTP Request Handlers
//!
//! This module contains all HTTP request handlers for the application.
//!
//! ## Available Handlers
//!
//! - **Authentication** (`auth`) - Registration, login and current-user lookup
//! - **Fallback** (`fallback`) - Uniform errors for unmatched routes and methods
//! - **Health Check** (`health_check`) - Application health monitoring

mod auth;
mod fallback;
mod health_check;

pub use auth::*;
pub use fallback::*;
pub use health_check::*;

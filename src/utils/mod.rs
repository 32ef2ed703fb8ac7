//! # Utility Modules
//!
//! This module contains utility functions, constants, and validators used
//! throughout the application.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Application-wide configuration constants
//! - **Secrets** (`secret`) - File-or-environment secret lookup
//! - **Validators** (`validator`) - Validating JSON body extractor

pub mod constant;
pub mod secret;
pub mod validator;

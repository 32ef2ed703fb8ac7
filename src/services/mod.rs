//! # Business Logic Services
//!
//! This module contains the collaborators the HTTP handlers rely on.
//!
//! ## Available Services
//!
//! - **JWT** (`jwt`) - Access token issuing and validation
//! - **Password** (`password`) - One-way credential hashing
//! - **Store** (`store`) - User record persistence

pub mod jwt;
pub mod password;
pub mod store;

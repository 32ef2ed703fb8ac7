//! # JWT Service
//!
//! This module issues and verifies the signed, time-limited tokens that gate
//! protected routes. A token carries only the user identifier and its timestamps;
//! there is no server-side session, so a token stays valid until it expires.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::utils::constant::ACCESS_TOKEN_EXPIRY;

/// Errors that can occur during JWT operations
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as string)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Service for signing and validating access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service signing with the given HMAC secret.
    pub fn new(secret: &SecretString) -> Self {
        Self::with_ttl(secret, ACCESS_TOKEN_EXPIRY)
    }

    fn with_ttl(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        let mut validation = Validation::default();
        // Expiry is exact; no grace period for clock skew.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation,
            ttl,
        }
    }

    /// Issues an access token bound to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EncodingError`] if signing fails.
    #[instrument(skip(self))]
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System time should not be before UNIX EPOCH")
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.ttl.as_secs(),
            iat: now,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        trace!("Access token created");

        Ok(token)
    }

    /// Validates an access token and returns its claims.
    ///
    /// Checks signature and expiration only; no store lookup is made.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TokenExpired`] - Token has expired
    /// - [`TokenError::InvalidToken`] - Token is malformed or has invalid signature
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        trace!("Validating access token");

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => {
                trace!(user_id = %token_data.claims.sub, "Access token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                debug!("Access token expired");
                Err(TokenError::TokenExpired)
            }
            Err(e) => {
                debug!(error = %e, "Invalid access token");
                Err(TokenError::InvalidToken)
            }
        }
    }
}

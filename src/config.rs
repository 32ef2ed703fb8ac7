//! # Configuration
//!
//! Process-wide settings are read exactly once at startup into [`Config`] and
//! handed to the services that need them. Nothing downstream reads the
//! environment on its own.
//!
//! ## Environment Variables
//!
//! - `JWT_SECRET` - Required. Token signing secret (or `JWT_SECRET_FILE` pointing at a file)
//! - `PORT` - Listening port, default [`DEFAULT_PORT`]
//! - `DATABASE_URL` - PostgreSQL connection string; required when `APP_ENV=production`
//! - `BCRYPT_COST` - Password hashing work factor, default [`DEFAULT_BCRYPT_COST`]
//! - `APP_ENV` - `production` enables JSON logs and requires a database

use std::env;

use secrecy::SecretString;
use thiserror::Error;

use crate::utils::constant::{DEFAULT_BCRYPT_COST, DEFAULT_PORT};
use crate::utils::secret::get_secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`JWT_SECRET` must be set to a non-empty value")]
    MissingJwtSecret,
    #[error("`DATABASE_URL` must be set in production")]
    MissingDatabaseUrl,
    #[error("invalid value for `{name}`: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: SecretString,
    pub database_url: Option<String>,
    pub bcrypt_cost: u32,
    pub production: bool,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the signing secret is absent or empty, when a numeric setting
    /// doesn't parse, or when production runs without a database.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = get_secret("JWT_SECRET_FILE", "JWT_SECRET");
        Self::from_vars(jwt_secret, |name| env::var(name).ok())
    }

    fn from_vars(
        jwt_secret: Option<String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(value) => match value.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "BCRYPT_COST",
                        value,
                    });
                }
            },
            None => DEFAULT_BCRYPT_COST,
        };

        let production = var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let database_url = var("DATABASE_URL").filter(|url| !url.is_empty());
        if production && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(Self {
            port,
            jwt_secret: SecretString::from(jwt_secret),
            database_url,
            bcrypt_cost,
            production,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(secret: Option<&str>, vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(secret.map(str::to_string), |name| vars.get(name).cloned())
    }

    #[test]
    fn missing_secret_fails_fast() {
        assert!(matches!(load(None, &[]), Err(ConfigError::MissingJwtSecret)));
        assert!(matches!(
            load(Some(""), &[]),
            Err(ConfigError::MissingJwtSecret)
        ));
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(Some("s3cret"), &[]).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
        assert_eq!(config.jwt_secret.expose_secret(), "s3cret");
        assert!(config.database_url.is_none());
        assert!(!config.production);
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = load(
            Some("s3cret"),
            &[
                ("PORT", "3000"),
                ("BCRYPT_COST", "12"),
                ("DATABASE_URL", "postgres://localhost/auth"),
            ],
        )
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/auth")
        );
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(matches!(
            load(Some("s3cret"), &[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            load(Some("s3cret"), &[("BCRYPT_COST", "2")]),
            Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                ..
            })
        ));
    }

    #[test]
    fn production_requires_database() {
        assert!(matches!(
            load(Some("s3cret"), &[("APP_ENV", "Production")]),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }
}

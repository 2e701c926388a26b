//! Environment-driven server configuration.

use std::str::FromStr;

use crate::server::error::config::ConfigError;

/// Default number of orders per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Default maximum upload size (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_ADMIN_PASSWORD: &str = "password";

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub page_size: u64,
    pub max_upload_bytes: usize,
    pub default_admin_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and optional ones valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `VALKEY_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable could not be parsed
    /// - `Err(ConfigError::ZeroValue)` - `PAGE_SIZE` or `MAX_UPLOAD_BYTES` is zero
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            valkey_url: required_var("VALKEY_URL")?,
            bind_address: optional_var("BIND_ADDRESS", DEFAULT_BIND_ADDRESS.to_string())?,
            page_size: nonzero(
                "PAGE_SIZE",
                optional_var("PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            )?,
            max_upload_bytes: nonzero(
                "MAX_UPLOAD_BYTES",
                optional_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            )?,
            default_admin_password: optional_var(
                "DEFAULT_ADMIN_PASSWORD",
                DEFAULT_ADMIN_PASSWORD.to_string(),
            )?,
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional_var<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

fn nonzero<T>(var: &str, value: T) -> Result<T, ConfigError>
where
    T: Default + PartialEq,
{
    if value == T::default() {
        return Err(ConfigError::ZeroValue(var.to_string()));
    }

    Ok(value)
}

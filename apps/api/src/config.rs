//! Application configuration loaded from environment variables.
//!
//! `main` loads a `.env` file first when one exists, so every variable can
//! also be set there.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: "info,city_info_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string. When unset the API serves
//!   from the in-memory store
//! - `DATABASE_MAX_CONNECTIONS`: DB pool size (default: 5)
//! - `IGNORE_MISSING_MIGRATIONS`: Skip missing migrations (default: true)
//! - `SEED_PATH`: JSON seed file (default: the embedded `seed/cities.json`)
//! - `MAIL_TO`: Recipient of deletion notices (default: "admin@mycompany.com")
//! - `MAIL_FROM`: Sender of deletion notices (default: "noreply@mycompany.com")

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,

    pub database_max_connections: u32,

    pub ignore_missing_migrations: bool,

    /// Seed file loaded at startup
    pub seed_path: Option<PathBuf>,

    pub mail_to: String,

    pub mail_from: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the
    /// expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            database_url: env_optional("DATABASE_URL"),
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5)?,
            ignore_missing_migrations: env_or("IGNORE_MISSING_MIGRATIONS", true)?,
            seed_path: env_optional("SEED_PATH").map(PathBuf::from),
            mail_to: env_or("MAIL_TO", "admin@mycompany.com".to_string())?,
            mail_from: env_or("MAIL_FROM", "noreply@mycompany.com".to_string())?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            database_max_connections: 5,
            ignore_missing_migrations: true,
            seed_path: None,
            mail_to: "admin@mycompany.com".to_string(),
            mail_from: "noreply@mycompany.com".to_string(),
        }
    }
}

/// Non-empty value of `key`, if set.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

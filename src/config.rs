//! Application configuration loading from environment variables.
//!
//! All configuration is read from the environment at startup (after `.env`
//! is loaded by `dotenvy`), so the service runs unchanged in containers and
//! on a developer machine.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `JWT_SECRET`: Secret key for access token signing
//! - `EMAIL_SECRET`: Secret key for email-verification tokens
//! - `DATABASE_URL`: PostgreSQL connection string (only when `STORAGE_BACKEND=postgres`)
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,promptly_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 5001)
//! - `DATABASE_MAX_CONNECTIONS`: DB pool size (default: 20)
//! - `STORAGE_BACKEND`: `postgres` or `memory` (default: postgres)
//! - `CLIENT_URL`: Frontend base URL used in verification links (default: "http://localhost:5173")
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins; any origin when unset
//! - `OUTPUT_SPLIT`: Separator of the legacy prompt output encoding (default: "@@IMAGE@@")
//! - `JWT_TTL_HOURS`: Access token lifetime (default: 168)
//! - `BCRYPT_COST`: Password hashing cost (default: bcrypt's default cost)
//! - `TOTP_ISSUER`: Issuer shown in authenticator apps (default: "Promptly")
//! - `IGNORE_MISSING_MIGRATIONS`: Skip missing migrations (default: true)

use crate::domain::prompt::value_objects::DEFAULT_OUTPUT_SEPARATOR;
use serde::Deserialize;
use std::str::FromStr;

/// Where documents are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    /// Process-local maps; nothing survives a restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string; `None` only with the memory backend
    pub database_url: Option<String>,

    /// Maximum number of concurrent database connections
    pub database_max_connections: u32,

    pub storage_backend: StorageBackend,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Secret key for access token signing and verification
    pub jwt_secret: String,

    /// Secret key for email-verification tokens
    pub email_secret: String,

    /// Access token lifetime in hours
    pub jwt_ttl_hours: i64,

    pub bcrypt_cost: u32,

    /// Frontend base URL, used to build verification links
    pub client_url: String,

    /// Explicit CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,

    /// Separator between text and image URL in stored prompt outputs
    pub output_separator: String,

    pub totp_issuer: String,

    /// Skip missing migrations during startup
    pub ignore_missing_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_backend: StorageBackend = env_or("STORAGE_BACKEND", StorageBackend::Postgres)?;
        let database_url = match storage_backend {
            StorageBackend::Postgres => Some(env_required("DATABASE_URL")?),
            StorageBackend::Memory => std::env::var("DATABASE_URL").ok(),
        };

        Ok(Self {
            database_url,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 20)?,
            storage_backend,
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 5001)?,
            jwt_secret: env_required("JWT_SECRET")?,
            email_secret: env_required("EMAIL_SECRET")?,
            jwt_ttl_hours: env_or("JWT_TTL_HOURS", 168)?,
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            client_url: env_or("CLIENT_URL", "http://localhost:5173".to_string())?,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            output_separator: env_or("OUTPUT_SPLIT", DEFAULT_OUTPUT_SEPARATOR.to_string())?,
            totp_issuer: env_or("TOTP_ISSUER", "Promptly".to_string())?,
            ignore_missing_migrations: env_or("IGNORE_MISSING_MIGRATIONS", true)?,
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
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

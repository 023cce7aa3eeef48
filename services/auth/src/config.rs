//! Service configuration loaded once at start-up
//!
//! Everything the service reads from the process environment is collected in
//! [`AppConfig`] and handed to the components that need it; nothing below
//! `main` looks at environment variables directly.

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;

use common::database::DatabaseConfig;

/// Origins of the development front end, always allowed.
pub const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEFAULT_JWT_SECRET: &str = "dev_secret";

/// Raw settings as they appear in the environment
#[derive(Debug, Deserialize)]
struct Settings {
    port: u16,
    web_origins: String,
    jwt_secret: String,
    database_url: String,
    database_max_connections: u32,
    cookie_secure: bool,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP listener binds on `0.0.0.0`
    pub port: u16,
    /// Browser origins allowed to make credentialed requests
    pub allowed_origins: Vec<String>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Load the configuration from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: listening port (default: 3001)
    /// - `WEB_ORIGINS`: extra allowed origins, comma separated (default: none)
    /// - `JWT_SECRET`: token signing secret (default: `dev_secret`)
    /// - `DATABASE_URL`: SQLite connection URL (default: `sqlite://dev.db`)
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `COOKIE_SECURE`: set `Secure` on the session cookie (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("port", 3001)?
            .set_default("web_origins", "")?
            .set_default("jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("database_url", "sqlite://dev.db")?
            .set_default("database_max_connections", 5)?
            .set_default("cookie_secure", false)?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()?;

        if settings.jwt_secret.is_empty() {
            return Err(ConfigError::Message("JWT_SECRET must not be empty".to_string()));
        }

        if settings.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Signing tokens with the development secret");
        }

        Ok(AppConfig {
            port: settings.port,
            allowed_origins: parse_origins(&settings.web_origins),
            jwt_secret: settings.jwt_secret,
            database: DatabaseConfig::new(
                settings.database_url,
                settings.database_max_connections,
            ),
            cookie_secure: settings.cookie_secure,
        })
    }
}

/// Split a comma separated origin list and append the development defaults.
///
/// Entries are trimmed and empty entries dropped; duplicates are removed
/// keeping the first occurrence.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();

    let configured = raw.split(',').map(str::trim).filter(|s| !s.is_empty());
    for origin in configured.chain(DEFAULT_ORIGINS) {
        if !origins.iter().any(|o| o == origin) {
            origins.push(origin.to_string());
        }
    }

    origins
}

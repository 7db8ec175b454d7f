//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid, or the process
//! exits with a clear error before anything else starts.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tribble_auth::SigningSecret;

/// Bounds for `DB_TIMEOUT_SECS`.
const DB_TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Process configuration, built once in `main` and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// HS256 secret shared by the token issuer and validator.
    pub jwt_secret: SigningSecret,

    /// Bind address.
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// Log filter directive.
    pub rust_log: String,

    /// Connection pool size.
    pub db_max_connections: u32,

    /// Bound on pool checkout and on every repository call.
    pub db_timeout: Duration,

    /// Allowed CORS origins (`*` for any).
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[redacted]")
            .field("jwt_secret", &self.jwt_secret)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_timeout", &self.db_timeout)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// does not parse.
    ///
    /// # Required Variables
    ///
    /// - `DATABASE_URL` - PostgreSQL connection string
    /// - `JWT_SECRET_KEY` - HS256 signing secret (non-empty)
    ///
    /// # Optional Variables
    ///
    /// - `HOST` - Bind address (default: "0.0.0.0")
    /// - `PORT` - Listen port (default: 8080)
    /// - `RUST_LOG` - Log level filter (default: "info")
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
    /// - `DB_TIMEOUT_SECS` - Per-call store timeout, 1-30 (default: 3)
    /// - `CORS_ORIGINS` - Comma-separated allowed origins (default: "*")
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&get, "DATABASE_URL")?;

        let jwt_secret = SigningSecret::new(required(&get, "JWT_SECRET_KEY")?).map_err(|_| {
            ConfigError::InvalidValue {
                var: "JWT_SECRET_KEY".to_string(),
                message: "Must not be empty".to_string(),
            }
        })?;

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = get("PORT").unwrap_or_else(|| "8080".to_string()).parse()?;

        let rust_log = get("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let db_max_connections: u32 = parse_or(&get, "DB_MAX_CONNECTIONS", 10)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DB_MAX_CONNECTIONS".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        let db_timeout_secs: u64 = parse_or(&get, "DB_TIMEOUT_SECS", 3)?;
        if !DB_TIMEOUT_RANGE.contains(&db_timeout_secs) {
            return Err(ConfigError::InvalidValue {
                var: "DB_TIMEOUT_SECS".to_string(),
                message: format!(
                    "Must be between {} and {}",
                    DB_TIMEOUT_RANGE.start(),
                    DB_TIMEOUT_RANGE.end()
                ),
            });
        }

        let cors_origins = get("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
            rust_log,
            db_max_connections,
            db_timeout: Duration::from_secs(db_timeout_secs),
            cors_origins,
        })
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required<F>(get: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(var)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingVar(var.to_string()))
}

fn parse_or<F, T>(get: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: var.to_string(),
            message: e.to_string(),
        }),
    }
}

/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables and
 * opens the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * | Variable              | Meaning                           | Default            |
 * |-----------------------|-----------------------------------|--------------------|
 * | `DATABASE_URL`        | Postgres connection string        | unset: in-memory   |
 * | `JWT_SECRET_KEY`      | HMAC signing secret               | required           |
 * | `JWT_EXPIRES_IN_SECS` | token validity window in seconds  | 3600               |
 * | `BCRYPT_COST`         | bcrypt work factor                | 10                 |
 * | `UPLOAD_DIR`          | avatar directory                  | `uploads`          |
 * | `MAX_UPLOAD_BYTES`    | registration body cap             | 2 MiB              |
 * | `SERVER_PORT`         | listening port                    | 5001               |
 *
 * # Error Handling
 *
 * A missing signing secret or an unparsable number stops startup. Database
 * problems do not: they are logged and the server falls back to in-memory
 * stores.
 */

use sqlx::PgPool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::backend::auth::password::BcryptHasher;

const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_PORT: u16 = 5001;

/// Startup configuration failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Everything the server needs at startup; read-only afterwards
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("port", &self.port)
            .finish()
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let ttl_secs: u64 = parse_or(&lookup, "JWT_EXPIRES_IN_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRES_IN_SECS",
                value: ttl_secs.to_string(),
            });
        }

        let bcrypt_cost: u32 = parse_or(&lookup, "BCRYPT_COST", BcryptHasher::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            bcrypt_cost,
            upload_dir: lookup("UPLOAD_DIR")
                .filter(|s| !s.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR), PathBuf::from),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_or(&lookup, "SERVER_PORT", DEFAULT_PORT)?,
        })
    }
}

/// Open the database pool and run migrations
///
/// Returns `None` when `database_url` is absent or the connection fails;
/// the caller then runs on in-memory stores.
pub async fn load_database(database_url: Option<&str>) -> Option<PgPool> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Using in-memory stores; data will not survive a restart.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(config.port, 5001);
    }

    #[test]
    fn test_secret_is_required() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET_KEY"));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/courses"),
            ("JWT_EXPIRES_IN_SECS", "60"),
            ("BCRYPT_COST", "4"),
            ("UPLOAD_DIR", "/var/lib/coursehub/uploads"),
            ("SERVER_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/courses"));
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.upload_dir, PathBuf::from("/var/lib/coursehub/uploads"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_numbers() {
        let err = ServerConfig::from_lookup(lookup(&[("JWT_SECRET_KEY", "s"), ("SERVER_PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "SERVER_PORT",
                value: "http".to_string()
            }
        );

        let err = ServerConfig::from_lookup(lookup(&[("JWT_SECRET_KEY", "s"), ("BCRYPT_COST", "2")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BCRYPT_COST", .. }));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET_KEY", "s3cret")])).unwrap();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}

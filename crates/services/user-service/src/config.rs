//! User service configuration.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use common::DatabaseConfig;
use domain::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVICE_HOST, DEFAULT_SERVICE_PORT};

/// Storage backend behind the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// Postgres through SeaORM
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" => Ok(StorageBackend::Postgres),
            other => Err(format!(
                "unknown storage backend '{}' (expected 'memory' or 'postgres')",
                other
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Which storage backend to run against
    pub storage: StorageBackend,
    /// Database settings (postgres backend and migrations)
    pub database: DatabaseConfig,
    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let storage = match env::var("USER_SERVICE_STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.storage,
        };

        Ok(Self {
            host: env::var("USER_SERVICE_HOST").unwrap_or(defaults.host),
            port: env::var("USER_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            storage,
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                ..defaults.database
            },
            request_timeout_secs: env::var("USER_SERVICE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVICE_HOST.to_string(),
            port: DEFAULT_SERVICE_PORT,
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

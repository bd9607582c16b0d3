//! Configuration loading and typed config structures for the flight service.
//!
//! Configuration lives in `flightstore-config.yaml` next to the binary's
//! working directory. Every field has a default, so an empty file (or no
//! file at all) yields a runnable in-memory service on port 8080.
//!
//! Environment variables override the file:
//! - `DATABASE_URL` overrides `database.url`
//! - `FLIGHTSTORE_HOST` overrides `server.host`
//! - `FLIGHTSTORE_PORT` overrides `server.port`

use std::path::Path;
use std::time::Duration;

use flightstore_db::PostgresConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid environment variable {name}: {reason}")]
    Env {
        /// Variable name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration, mirroring `flightstore-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Query validation rules.
    #[serde(default)]
    pub query: QueryConfig,

    /// Background maintenance.
    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override file values with variables looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `FLIGHTSTORE_PORT` is not a port number.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(host) = lookup("FLIGHTSTORE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FLIGHTSTORE_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::Env {
                name: "FLIGHTSTORE_PORT",
                reason: format!("{e}"),
            })?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` URL. When absent the service runs on the in-memory store.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds before an idle connection is closed.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Pool settings for the configured URL, or `None` for the in-memory store.
    pub fn postgres(&self) -> Option<PostgresConfig> {
        self.url.as_deref().map(|url| {
            PostgresConfig::new(url)
                .with_max_connections(self.max_connections)
                .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
                .with_idle_timeout(Duration::from_secs(self.idle_timeout_secs))
        })
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

/// Query validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    /// How many days past today date queries may reach (inclusive).
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            lookahead_days: default_lookahead_days(),
        }
    }
}

/// Background maintenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MaintenanceConfig {
    /// Seconds between retention sweeps; `0` disables the sweep.
    #[serde(default)]
    pub cleanup_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_idle_timeout_secs() -> u64 {
    300
}

const fn default_lookahead_days() -> u64 {
    7
}

fn default_log_level() -> String {
    "info".to_owned()
}

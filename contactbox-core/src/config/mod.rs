//! Configuration management for ContactBox
//!
//! Configuration comes from (lowest to highest precedence) built-in defaults,
//! an optional TOML file and environment variables. The binary applies CLI
//! flags on top of the result.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

mod error;

pub use error::ConfigError;

/// Development-only admin password used when `ADMIN_PASSWORD` is unset.
///
/// Anyone who has read this source knows it. Never run a public deployment
/// without overriding it.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Store configuration
    pub store: StoreConfig,

    /// Admin access configuration
    pub admin: AdminConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file
    pub db_path: PathBuf,
}

/// Admin access configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared secret required by the admin endpoints
    pub password: String,

    /// Include raw storage error text in admin endpoint failures
    pub expose_internal_errors: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include target module
    pub with_target: bool,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus exporter
    pub enabled: bool,

    /// Exporter bind address
    pub bind_address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Socket address the HTTP server binds to
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("contacts.db"),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            expose_internal_errors: true,
        }
    }
}

impl AdminConfig {
    /// Whether the insecure development password is still in effect
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .field("expose_internal_errors", &self.expose_internal_errors)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9090),
        }
    }
}

impl Config {
    /// Load configuration from environment variables on top of the defaults
    ///
    /// `ADMIN_PASSWORD` and `PORT` keep their conventional names; everything
    /// else follows the pattern CONTACTBOX_<KEY>.
    /// Example: CONTACTBOX_DB_PATH=/var/lib/contactbox/contacts.db
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.merge_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Self::from_file_with_lookup(path, |key| env::var(key).ok())
    }

    /// Like [`Config::from_file`], with `lookup` standing in for the environment
    pub fn from_file_with_lookup<F>(
        path: impl AsRef<std::path::Path>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let mut config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.merge_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite fields for every variable `lookup` knows about
    pub fn merge_lookup<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server config
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid port: {}", e)))?;
        }
        if let Some(host) = lookup("CONTACTBOX_HOST") {
            self.server.host = host
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid host: {}", e)))?;
        }

        // Store config
        if let Some(db_path) = lookup("CONTACTBOX_DB_PATH") {
            self.store.db_path = PathBuf::from(db_path);
        }

        // Admin config
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        if let Some(expose) = lookup("CONTACTBOX_EXPOSE_ERRORS") {
            self.admin.expose_internal_errors = expose.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid expose-errors flag: {}", e))
            })?;
        }

        // Logging config
        if let Some(level) = lookup("CONTACTBOX_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(json) = lookup("CONTACTBOX_LOG_JSON") {
            self.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }

        // Metrics config
        if let Some(enabled) = lookup("CONTACTBOX_METRICS_ENABLED") {
            self.metrics.enabled = enabled
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid metrics flag: {}", e)))?;
        }
        if let Some(addr) = lookup("CONTACTBOX_METRICS_BIND_ADDRESS") {
            self.metrics.bind_address = addr.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid metrics address: {}", e))
            })?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationFailed(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.store.db_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "db_path must not be empty".to_string(),
            ));
        }

        // An empty secret would let an empty `password` parameter through.
        if self.admin.password.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "admin password must not be empty".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }
}

mod parser;
use serde::{Deserialize, Serialize};

pub use parser::load_config;

/// Errors raised while assembling the runtime configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Runtime configuration of the service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP listener binds to
    pub host: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Path of the SQLite file holding the students table
    pub database_path: String,
    /// Maximum number of pooled connections
    pub pool_size: u32,
    /// How long a request waits for a pooled connection
    pub connection_timeout_secs: u64,
    /// How long SQLite waits on a locked database before failing a statement
    pub busy_timeout_ms: u64,
    /// Directory for the rolling log file
    pub log_dir: String,
    /// Whether logs are also written to a file
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: "data.db".to_string(),
            pool_size: 8,
            connection_timeout_secs: 30,
            busy_timeout_ms: 5000,
            log_dir: "logs".to_string(),
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Applies `DATABASE_PATH`, `SCHOOL_API_HOST` and `SCHOOL_API_PORT` from the environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database_path = path;
        }
        if let Some(host) = lookup("SCHOOL_API_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("SCHOOL_API_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SCHOOL_API_PORT".to_string(),
                value: port,
            })?;
        }
        Ok(())
    }

    /// Applies values given on the command line; `None` keeps the current value
    pub fn apply_cli_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
        database_path: Option<String>,
    ) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database_path) = database_path {
            self.database_path = database_path;
        }
    }

    /// Rejects values the pool or the listener cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pool_size".to_string(),
                value: self.pool_size.to_string(),
            });
        }
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "database_path".to_string(),
                value: self.database_path.clone(),
            });
        }
        Ok(())
    }
}

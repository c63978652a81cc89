use serde::Deserialize;
use std::env;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the School API server.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Interface the HTTP listener binds to.
    pub server_host: Ipv4Addr,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Optional JSON file used to pre-populate the student store.
    pub seed_file: Option<PathBuf>,
    /// Optional log file path; the logging module picks a default when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: Ipv4Addr::UNSPECIFIED,
            server_port: None,
            seed_file: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Ok(Self {
            server_host: optional("SERVER_HOST")
                .map(|value| parse_value("SERVER_HOST", &value))
                .transpose()?
                .unwrap_or(Ipv4Addr::UNSPECIFIED),
            server_port: optional("SERVER_PORT")
                .map(|value| parse_value("SERVER_PORT", &value))
                .transpose()?,
            seed_file: optional("SCHOOL_API_SEED_FILE").map(PathBuf::from),
            log_file: optional("SCHOOL_API_LOG_FILE").map(PathBuf::from),
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, falling back to defaults if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Load configuration from the environment and install it in the global cache.
///
/// A configuration installed earlier is kept.
pub fn init_config() -> Result<(), ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let _ = CONFIG.set(config);
    Ok(())
}

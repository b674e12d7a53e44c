//! Configuration handling for the service.
//!
//! Everything comes from environment variables with development defaults.
//! `Config::from_env` reads and validates them once at startup.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable names.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_LOG_FILTER: &str = "LOG_FILTER";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_CHARACTER_LIMIT: &str = "EDITOR_CHARACTER_LIMIT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_CHARACTER_LIMIT: usize = crate::editor::surface::DEFAULT_CHARACTER_LIMIT;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: ENV_LOG_FORMAT,
                reason: format!("expected 'text' or 'json', got '{other}'"),
            }),
        }
    }
}

/// Service runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    log_filter: String,
    log_format: LogFormat,
    character_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Text,
            character_limit: DEFAULT_CHARACTER_LIMIT,
        }
    }
}

impl Config {
    pub fn new(bind_addr: impl Into<String>, character_limit: usize) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            character_limit,
            ..Self::default()
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        if bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: ENV_BIND_ADDR,
                reason: format!("'{bind_addr}' is not a host:port socket address"),
            });
        }

        let log_filter =
            env::var(ENV_LOG_FILTER).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let log_format = match env::var(ENV_LOG_FORMAT) {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };

        let character_limit = match env::var(ENV_CHARACTER_LIMIT) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_CHARACTER_LIMIT,
                        reason: format!("expected a positive integer, got '{value}'"),
                    });
                }
            },
            Err(_) => DEFAULT_CHARACTER_LIMIT,
        };

        Ok(Self {
            bind_addr,
            log_filter,
            log_format,
            character_limit,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
    /// Character counter limit for editor fields.
    pub fn character_limit(&self) -> usize {
        self.character_limit
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

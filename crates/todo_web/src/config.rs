//! Environment-driven configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by the binary before [`AppConfig::from_env`] runs.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use todo_core::logging::{default_log_level, normalize_level};

pub const DATABASE_PATH_VAR: &str = "TODO_DATABASE_PATH";
pub const HOST_VAR: &str = "TODO_HOST";
pub const PORT_VAR: &str = "TODO_PORT";
pub const STATIC_DIR_VAR: &str = "TODO_STATIC_DIR";
pub const LOG_LEVEL_VAR: &str = "TODO_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TODO_LOG_DIR";

const DEFAULT_DATABASE_PATH: &str = "todo.sqlite3";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVar {
                name,
                value,
                reason,
            } => write!(f, "invalid {name}=`{value}`: {reason}"),
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// Unset and blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = match var(HOST_VAR) {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|err| invalid(HOST_VAR, &value, err))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match var(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|err| invalid(PORT_VAR, &value, err))?,
            None => DEFAULT_PORT,
        };

        let log_level = match var(LOG_LEVEL_VAR) {
            Some(value) => {
                normalize_level(&value).map_err(|reason| invalid(LOG_LEVEL_VAR, &value, reason))?
            }
            None => default_log_level(),
        };

        Ok(Self {
            database_path: var(DATABASE_PATH_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from),
            host,
            port,
            static_dir: var(STATIC_DIR_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            log_level,
            log_dir: var(LOG_DIR_VAR),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidVar {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

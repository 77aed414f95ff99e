//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default catalog database file.
const DEFAULT_DB_PATH: &str = "bus_routes.db";

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default interval between location index refreshes (1 hour).
const DEFAULT_LOCATION_REFRESH_SECS: u64 = 60 * 60;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds a value that doesn't parse
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// SQLite catalog file (`BUS_DB_PATH`).
    pub db_path: PathBuf,

    /// Address to listen on (`BUS_BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// JSON seed file imported into an empty catalog at startup
    /// (`BUS_SEED_PATH`).
    pub seed_path: Option<PathBuf>,

    /// JSON filter configuration overriding the built-in tables
    /// (`BUS_FILTER_CONFIG`).
    pub filter_config_path: Option<PathBuf>,

    /// How often to rebuild the location index (`BUS_LOCATION_REFRESH_SECS`).
    pub location_refresh: Duration,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let db_path = get("BUS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let bind_addr = get("BUS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BUS_BIND_ADDR",
                message: e.to_string(),
            })?;

        let location_refresh_secs = match get("BUS_LOCATION_REFRESH_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "BUS_LOCATION_REFRESH_SECS",
                message: e.to_string(),
            })?,
            None => DEFAULT_LOCATION_REFRESH_SECS,
        };
        if location_refresh_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "BUS_LOCATION_REFRESH_SECS",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            db_path,
            bind_addr,
            seed_path: get("BUS_SEED_PATH").map(PathBuf::from),
            filter_config_path: get("BUS_FILTER_CONFIG").map(PathBuf::from),
            location_refresh: Duration::from_secs(location_refresh_secs),
        })
    }
}

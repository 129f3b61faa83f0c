//! Runtime settings read from the environment.
//!
//! The environment contract is small: `DATABASE_URL` selects PostgreSQL
//! persistence (absent means the in-memory fallback), and `BIND_ADDR`
//! optionally overrides the listen address.

use std::env;
use std::net::SocketAddr;

/// Listen address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
    8080,
);

/// Errors raised while reading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `BIND_ADDR` is present but not a socket address.
    #[error("invalid BIND_ADDR {value}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings for the HTTP server process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the server binds to.
    pub bind_addr: SocketAddr,
    /// Database connection string; `None` selects the in-memory fallback.
    pub database_url: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when `BIND_ADDR` does not
    /// parse as a socket address.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_values(env::var("BIND_ADDR").ok(), env::var("DATABASE_URL").ok())
    }

    fn from_values(
        bind_addr: Option<String>,
        database_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        let bind_addr = match bind_addr {
            Some(value) => value
                .parse()
                .map_err(|source| SettingsError::InvalidBindAddr { value, source })?,
            None => DEFAULT_BIND_ADDR,
        };
        Ok(Self {
            bind_addr,
            database_url,
        })
    }
}

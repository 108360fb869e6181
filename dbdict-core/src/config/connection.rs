//! Database connection configuration.
//!
//! This module provides the `ConnectionConfig` struct for configuring the
//! single MySQL session used for a run.

use std::time::Duration;

/// Default MySQL port.
pub const DEFAULT_PORT: u16 = 3306;

/// Default host when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Configuration for the database connection.
///
/// # Security
/// This struct intentionally does NOT store passwords. Credentials travel
/// separately in [`crate::security::Credentials`].
///
/// # Example
/// ```rust
/// use dbdict_core::config::ConnectionConfig;
///
/// let config = ConnectionConfig::new("db.internal".to_string()).with_port(3307);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.to_string(), "db.internal:3307");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Whether to open the session read-only
    pub read_only: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(30),
            read_only: true,
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never include credentials
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl ConnectionConfig {
    /// Creates a new connection config with safe defaults.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.trim().is_empty() {
            return Err(crate::error::DbDictError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::DbDictError::configuration(
                "port must be greater than 0",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(crate::error::DbDictError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

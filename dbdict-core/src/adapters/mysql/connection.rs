//! MySQL connection pool management.
//!
//! # Security Features
//! - Credentials go straight from [`Credentials`] into the driver options
//! - Every session is switched to `READ ONLY` before first use
//! - The pool connects eagerly so bad credentials fail before any output

use super::MySqlAdapter;
use crate::Result;
use crate::config::ConnectionConfig;
use crate::security::Credentials;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

impl MySqlAdapter {
    /// Connects to the server described by `config`.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the server rejects
    /// the connection
    pub async fn connect(config: ConnectionConfig, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        let pool = create_mysql_connection_pool(&config, credentials).await?;
        tracing::info!("Successfully connected to MySQL server at {}", config);

        Ok(Self { pool, config })
    }
}

/// Builds driver options from the safe config plus credentials.
pub fn connect_options(config: &ConnectionConfig, credentials: &Credentials) -> MySqlConnectOptions {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(credentials.username());

    match credentials.password() {
        Some(password) => options.password(password),
        None => options,
    }
}

/// Creates the single-connection pool and opens it.
async fn create_mysql_connection_pool(
    config: &ConnectionConfig,
    credentials: &Credentials,
) -> Result<MySqlPool> {
    use sqlx::Executor;

    let read_only = config.read_only;

    MySqlPoolOptions::new()
        .max_connections(1)
        .min_connections(0)
        .acquire_timeout(config.connect_timeout)
        .test_before_acquire(true)
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                if read_only {
                    conn.execute("SET SESSION TRANSACTION READ ONLY").await?;
                }

                // Timestamps are rendered without a zone
                conn.execute("SET time_zone = '+00:00'").await?;

                Ok(())
            })
        })
        .connect_with(connect_options(config, credentials))
        .await
        .map_err(|e| {
            crate::error::DbDictError::connection_failed(
                format!(
                    "Failed to connect to MySQL at {} as '{}'",
                    config,
                    credentials.username()
                ),
                e,
            )
        })
}

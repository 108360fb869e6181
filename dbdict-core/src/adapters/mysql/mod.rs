//! MySQL adapter built on a single-connection sqlx pool.
//!
//! # Module Structure
//! - `connection`: pool creation and session setup
//! - `schema_collection`: databases, tables, columns, comments and row counts
//! - `sampling`: ordering strategy detection and row sampling
//!
//! # Security Guarantees
//! - Sessions are `READ ONLY`
//! - Identifiers are backtick-quoted; metadata lookups bind names as parameters
//! - Connection errors never include the password

pub mod connection;
pub mod sampling;
pub mod schema_collection;


use crate::Result;
use crate::adapters::DatabaseAdapter;
use crate::config::ConnectionConfig;
use crate::models::{TableProfile, TableSample};
use async_trait::async_trait;
use sqlx::MySqlPool;

pub use sampling::{choose_ordering, generate_order_by_clause, sample_table};

/// Quotes a MySQL identifier with backticks, doubling embedded backticks.
///
/// # Example
/// ```rust
/// use dbdict_core::adapters::mysql::quote_identifier;
///
/// assert_eq!(quote_identifier("orders"), "`orders`");
/// assert_eq!(quote_identifier("odd`name"), "`odd``name`");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// MySQL adapter holding one pooled, read-only session.
pub struct MySqlAdapter {
    /// Connection pool capped at a single connection
    pub pool: MySqlPool,
    /// Connection configuration (no credentials)
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAdapter")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseAdapter for MySqlAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                crate::error::DbDictError::connection_failed(
                    format!("Connectivity check against {} failed", self.config),
                    e,
                )
            })?;

        if connectivity_result != 1 {
            return Err(crate::error::DbDictError::query_failed(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        Ok(())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        schema_collection::list_databases(&self.pool).await
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        schema_collection::list_tables(&self.pool, database).await
    }

    async fn describe_table(&self, database: &str, table: &str) -> Result<TableProfile> {
        schema_collection::describe_table(&self.pool, database, table).await
    }

    async fn sample_rows(&self, database: &str, table: &str, limit: u32) -> Result<TableSample> {
        sampling::sample_table(&self.pool, database, table, limit).await
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL connection to {} closed", self.config);
    }
}

//! Database adapter trait for schema introspection and row sampling.
//!
//! The driver only talks to a `Box<dyn DatabaseAdapter>`, so the MySQL
//! implementation can be swapped for an in-memory one in tests.
//!
//! # Module Structure
//! - `mysql`: sqlx-backed MySQL adapter (feature `mysql`)

use crate::Result;
use crate::models::{TableProfile, TableSample};
use async_trait::async_trait;

#[cfg(feature = "mysql")]
pub mod mysql;

/// Schemas that belong to the server rather than to users.
pub const SYSTEM_DATABASES: &[&str] = &["information_schema", "mysql", "performance_schema", "sys"];

/// True for MySQL's own schemas, compared case-insensitively.
pub fn is_system_database(name: &str) -> bool {
    SYSTEM_DATABASES
        .iter()
        .any(|system| system.eq_ignore_ascii_case(name))
}

/// Read-only access to a database server.
///
/// # Security Guarantees
/// - All operations are read-only
/// - Credentials are never stored in returned values or logged
///
/// # Object Safety
/// This trait is object-safe, allowing dynamic dispatch through
/// `Box<dyn DatabaseAdapter>`.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    /// Checks that the server answers a trivial query.
    ///
    /// # Errors
    /// Returns error if the connection is unusable
    async fn test_connection(&self) -> Result<()>;

    /// Lists user databases, excluding [`SYSTEM_DATABASES`].
    async fn list_databases(&self) -> Result<Vec<String>>;

    /// Lists tables and views in `database`.
    async fn list_tables(&self, database: &str) -> Result<Vec<String>>;

    /// Collects column metadata, the table comment and an exact row count.
    ///
    /// # Errors
    /// Returns error if any of the metadata queries fail or the table has
    /// no visible columns
    async fn describe_table(&self, database: &str, table: &str) -> Result<TableProfile>;

    /// Returns up to `limit` of the most recent rows.
    ///
    /// Rows are ordered by the auto-increment column descending, else by
    /// the first primary-key column descending, else left in scan order.
    async fn sample_rows(&self, database: &str, table: &str, limit: u32) -> Result<TableSample>;

    /// Releases the underlying connection.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_databases() {
        for name in ["information_schema", "MYSQL", "performance_schema", "sys"] {
            assert!(is_system_database(name), "{} should be a system schema", name);
        }
        for name in ["shop", "sysadmin", "mysql_archive"] {
            assert!(!is_system_database(name), "{} should be a user schema", name);
        }
    }
}

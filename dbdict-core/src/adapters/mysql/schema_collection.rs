//! MySQL schema introspection.
//!
//! All lookups go through `INFORMATION_SCHEMA` with schema and table names
//! bound as parameters. Text columns are cast to `CHAR` to avoid the
//! VARBINARY results MySQL 8.0 returns for some metadata columns.

use super::quote_identifier;
use crate::Result;
use crate::adapters::is_system_database;
use crate::error::DbDictError;
use crate::models::{ColumnDescriptor, KeyRole, NO_DESCRIPTION, TableProfile};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Lists user databases in name order.
pub async fn list_databases(pool: &MySqlPool) -> Result<Vec<String>> {
    let rows = sqlx::query(
        "SELECT CAST(SCHEMA_NAME AS CHAR) AS SCHEMA_NAME \
         FROM INFORMATION_SCHEMA.SCHEMATA \
         ORDER BY SCHEMA_NAME",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| DbDictError::collection_failed("Failed to enumerate databases", e))?;

    let mut databases = Vec::with_capacity(rows.len());
    for row in &rows {
        let name: String = row
            .try_get("SCHEMA_NAME")
            .map_err(|e| DbDictError::parse_field("SCHEMA_NAME", None, e))?;
        if !is_system_database(&name) {
            databases.push(name);
        }
    }

    tracing::debug!("Found {} user databases", databases.len());
    Ok(databases)
}

/// Lists base tables and views of `database` in name order.
pub async fn list_tables(pool: &MySqlPool, database: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(
        "SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME \
         FROM INFORMATION_SCHEMA.TABLES \
         WHERE TABLE_SCHEMA = ? \
         ORDER BY TABLE_NAME",
    )
    .bind(database)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        DbDictError::collection_failed(format!("Failed to list tables in '{}'", database), e)
    })?;

    rows.iter()
        .map(|row| {
            row.try_get::<String, _>("TABLE_NAME")
                .map_err(|e| DbDictError::parse_field("TABLE_NAME", Some(database), e))
        })
        .collect()
}

fn parse_column(row: &MySqlRow, qualified: &str) -> Result<ColumnDescriptor> {
    let get = |field: &str| -> Result<Option<String>> {
        row.try_get::<Option<String>, _>(field)
            .map_err(|e| DbDictError::parse_field(field, Some(qualified), e))
    };

    let name = get("COLUMN_NAME")?.unwrap_or_default();
    let declared_type = get("COLUMN_TYPE")?.unwrap_or_default();
    let nullable = get("IS_NULLABLE")?.is_some_and(|value| value.eq_ignore_ascii_case("YES"));
    let key_role = get("COLUMN_KEY")?
        .map(|marker| KeyRole::from_column_key(&marker))
        .unwrap_or_default();
    let default_value = get("COLUMN_DEFAULT")?;
    let extra = get("EXTRA")?.filter(|extra| !extra.is_empty());

    Ok(ColumnDescriptor {
        name,
        declared_type,
        nullable,
        key_role,
        default_value,
        extra,
    })
}

/// Fetches column metadata in ordinal order.
pub async fn fetch_columns(
    pool: &MySqlPool,
    database: &str,
    table: &str,
) -> Result<Vec<ColumnDescriptor>> {
    let qualified = format!("{}.{}", database, table);

    let rows = sqlx::query(
        "SELECT CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME, \
                CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE, \
                CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE, \
                CAST(COLUMN_KEY AS CHAR) AS COLUMN_KEY, \
                CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT, \
                CAST(EXTRA AS CHAR) AS EXTRA \
         FROM INFORMATION_SCHEMA.COLUMNS \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
         ORDER BY ORDINAL_POSITION",
    )
    .bind(database)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        DbDictError::collection_failed(format!("Failed to read columns of '{}'", qualified), e)
    })?;

    rows.iter().map(|row| parse_column(row, &qualified)).collect()
}

async fn fetch_table_comment(pool: &MySqlPool, database: &str, table: &str) -> Result<String> {
    let comment: Option<Option<String>> = sqlx::query_scalar(
        "SELECT CAST(TABLE_COMMENT AS CHAR) \
         FROM INFORMATION_SCHEMA.TABLES \
         WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?",
    )
    .bind(database)
    .bind(table)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        DbDictError::collection_failed(
            format!("Failed to read comment of '{}.{}'", database, table),
            e,
        )
    })?;

    Ok(description_or_default(comment.flatten()))
}

/// Only a missing or empty comment is replaced; whitespace is kept.
fn description_or_default(comment: Option<String>) -> String {
    comment
        .filter(|comment| !comment.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

async fn count_rows(pool: &MySqlPool, database: &str, table: &str) -> Result<u64> {
    let query = format!(
        "SELECT COUNT(*) FROM {}.{}",
        quote_identifier(database),
        quote_identifier(table)
    );

    let count: i64 = sqlx::query_scalar(&query)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            DbDictError::collection_failed(
                format!("Failed to count rows in '{}.{}'", database, table),
                e,
            )
        })?;

    u64::try_from(count)
        .map_err(|_| DbDictError::query_failed(format!("COUNT(*) returned {}", count)))
}

/// Builds the full profile of one table.
///
/// # Errors
/// Returns error if any query fails, or if the table has no visible columns
/// (it was dropped mid-run or the user lacks privileges)
pub async fn describe_table(pool: &MySqlPool, database: &str, table: &str) -> Result<TableProfile> {
    let columns = fetch_columns(pool, database, table).await?;
    if columns.is_empty() {
        return Err(DbDictError::query_failed(format!(
            "No columns visible for '{}.{}'",
            database, table
        )));
    }

    let description = fetch_table_comment(pool, database, table).await?;
    let row_count = count_rows(pool, database, table).await?;

    tracing::debug!(
        "Described {}.{}: {} columns, {} rows",
        database,
        table,
        columns.len(),
        row_count
    );

    Ok(TableProfile {
        database: database.to_string(),
        table: table.to_string(),
        description,
        row_count,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_falls_back_only_when_empty() {
        assert_eq!(description_or_default(None), NO_DESCRIPTION);
        assert_eq!(description_or_default(Some(String::new())), NO_DESCRIPTION);
        assert_eq!(description_or_default(Some("   ".to_string())), "   ");
        assert_eq!(
            description_or_default(Some("Customer orders".to_string())),
            "Customer orders"
        );
    }
}

//! MySQL row sampling.
//!
//! # Ordering Strategy Detection
//!
//! "Most recent" rows are approximated by:
//! 1. The auto-increment column, descending
//! 2. The first primary-key column, descending
//! 3. No ordering (scan order, not stable across runs)

use super::quote_identifier;
use super::schema_collection::fetch_columns;
use crate::error::DbDictError;
use crate::models::{
    ColumnDescriptor, KeyRole, OrderingStrategy, SampleRow, SampleValue, TableSample,
};
use sqlx::mysql::{MySql, MySqlRow};
use sqlx::{Column, MySqlPool, Row, TypeInfo, ValueRef};

/// Picks the ordering strategy from column metadata.
///
/// The first auto-increment column wins, then the first primary-key column
/// in ordinal order.
pub fn choose_ordering(columns: &[ColumnDescriptor]) -> OrderingStrategy {
    if let Some(column) = columns.iter().find(|c| c.is_auto_increment()) {
        return OrderingStrategy::AutoIncrement {
            column: column.name.clone(),
        };
    }

    if let Some(column) = columns.iter().find(|c| c.key_role == KeyRole::Primary) {
        return OrderingStrategy::PrimaryKey {
            column: column.name.clone(),
        };
    }

    OrderingStrategy::Unordered
}

/// Generates the ORDER BY clause for a strategy; empty when unordered.
pub fn generate_order_by_clause(strategy: &OrderingStrategy) -> String {
    match strategy {
        OrderingStrategy::AutoIncrement { column } | OrderingStrategy::PrimaryKey { column } => {
            format!("ORDER BY {} DESC", quote_identifier(column))
        }
        OrderingStrategy::Unordered => String::new(),
    }
}

/// Builds the sample query; the row limit is bound as the only parameter.
pub fn build_sample_query(database: &str, table: &str, strategy: &OrderingStrategy) -> String {
    let source = format!("{}.{}", quote_identifier(database), quote_identifier(table));
    match generate_order_by_clause(strategy).as_str() {
        "" => format!("SELECT * FROM {} LIMIT ?", source),
        order_by => format!("SELECT * FROM {} {} LIMIT ?", source, order_by),
    }
}

fn decode<'r, T>(row: &'r MySqlRow, index: usize) -> Option<T>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get::<T, _>(index).ok()
}

/// MySQL character types; binary-collated columns of these types arrive
/// flagged as binary and only decode as bytes.
const CHARACTER_TYPES: &[&str] = &[
    "CHAR", "VARCHAR", "TINYTEXT", "TEXT", "MEDIUMTEXT", "LONGTEXT", "ENUM", "SET", "JSON",
];

fn is_character_type(type_name: &str) -> bool {
    CHARACTER_TYPES
        .iter()
        .any(|name| type_name.eq_ignore_ascii_case(name))
}

/// Bytes read from a character column become text when they are UTF-8.
fn binary_cell(type_name: &str, bytes: Vec<u8>) -> SampleValue {
    if !is_character_type(type_name) {
        return SampleValue::Bytes(bytes);
    }
    match String::from_utf8(bytes) {
        Ok(text) => SampleValue::Text(text),
        Err(e) => SampleValue::Bytes(e.into_bytes()),
    }
}

/// Single-precision values keep their shortest form instead of the
/// widened `f64` digits.
fn float_cell(value: f32) -> SampleValue {
    SampleValue::Decimal(value.to_string())
}

/// Converts one result cell into a [`SampleValue`].
///
/// Types are tried from most to least specific. DECIMAL keeps its exact
/// text; anything the driver cannot decode is read unchecked as text, then
/// as bytes.
fn extract_column_value(row: &MySqlRow, index: usize) -> SampleValue {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return SampleValue::Null,
        Ok(_) => {}
        Err(_) => return SampleValue::Null,
    }

    let type_name = row.column(index).type_info().name();
    if type_name.eq_ignore_ascii_case("DECIMAL")
        && let Ok(text) = row.try_get_unchecked::<String, _>(index)
    {
        return SampleValue::Decimal(text);
    }

    if let Some(v) = decode::<String>(row, index) {
        return SampleValue::Text(v);
    }
    if type_name.eq_ignore_ascii_case("FLOAT")
        && let Some(v) = decode::<f32>(row, index)
    {
        return float_cell(v);
    }
    if let Some(v) = decode::<i64>(row, index) {
        return SampleValue::Integer(v);
    }
    if let Some(v) = decode::<u64>(row, index) {
        return SampleValue::Unsigned(v);
    }
    if let Some(v) = decode::<f64>(row, index) {
        return SampleValue::Float(v);
    }
    if let Some(v) = decode::<chrono::NaiveDateTime>(row, index) {
        return SampleValue::DateTime(v);
    }
    if let Some(v) = decode::<chrono::DateTime<chrono::Utc>>(row, index) {
        return SampleValue::DateTime(v.naive_utc());
    }
    if let Some(v) = decode::<chrono::NaiveDate>(row, index) {
        return SampleValue::Date(v);
    }
    if let Some(v) = decode::<chrono::NaiveTime>(row, index) {
        return SampleValue::Time(v);
    }
    if let Some(v) = decode::<Vec<u8>>(row, index) {
        return binary_cell(type_name, v);
    }

    if let Ok(text) = row.try_get_unchecked::<String, _>(index) {
        return SampleValue::Text(text);
    }
    if let Ok(bytes) = row.try_get_unchecked::<Vec<u8>, _>(index) {
        return binary_cell(type_name, bytes);
    }

    tracing::warn!(
        "Could not decode column '{}' of type {}, rendering as NULL",
        row.column(index).name(),
        type_name
    );
    SampleValue::Null
}

fn row_to_sample(row: &MySqlRow) -> SampleRow {
    (0..row.len())
        .map(|index| extract_column_value(row, index))
        .collect()
}

/// Samples up to `limit` recent rows from a table.
///
/// Column names come from the result set, so their order is the query's
/// order. When no rows come back the described column order is used.
pub async fn sample_table(
    pool: &MySqlPool,
    database: &str,
    table: &str,
    limit: u32,
) -> Result<TableSample, DbDictError> {
    let described = fetch_columns(pool, database, table).await?;
    let ordering = choose_ordering(&described);

    if matches!(ordering, OrderingStrategy::Unordered) {
        tracing::debug!(
            "No auto-increment or primary key on {}.{}, sample order is unspecified",
            database,
            table
        );
    }

    let query = build_sample_query(database, table, &ordering);
    let rows = sqlx::query(&query)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            DbDictError::collection_failed(
                format!("Failed to sample data from table '{}.{}'", database, table),
                e,
            )
        })?;

    let columns: Vec<String> = match rows.first() {
        Some(first) => first
            .columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect(),
        None => described.into_iter().map(|column| column.name).collect(),
    };

    tracing::debug!(
        "Sampled {} rows from {}.{} ordered by {}",
        rows.len(),
        database,
        table,
        ordering
    );

    Ok(TableSample {
        columns,
        rows: rows.iter().map(row_to_sample).collect(),
        ordering,
    })
}

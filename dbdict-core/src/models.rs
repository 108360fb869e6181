//! Data structures for introspected tables and sampled rows.
//!
//! Everything here is transient per-table working data: it is built from the
//! database, rendered into a markdown file and then dropped.

use base64::Engine;
use std::fmt;

/// Placeholder used when a table carries no comment.
pub const NO_DESCRIPTION: &str = "No description available";

/// Index role of a column as reported by `COLUMN_KEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRole {
    /// Not part of any index
    #[default]
    None,
    /// Part of the primary key (`PRI`)
    Primary,
    /// Leading column of a unique index (`UNI`)
    Unique,
    /// Leading column of a non-unique index (`MUL`)
    MultiValue,
}

impl KeyRole {
    /// Parses MySQL's `COLUMN_KEY` marker. Unknown markers map to `None`.
    pub fn from_column_key(marker: &str) -> Self {
        match marker.trim().to_uppercase().as_str() {
            "PRI" => Self::Primary,
            "UNI" => Self::Unique,
            "MUL" => Self::MultiValue,
            _ => Self::None,
        }
    }

    /// The marker shown in the report, or `None` when the column has no key.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Primary => Some("PRI"),
            Self::Unique => Some("UNI"),
            Self::MultiValue => Some("MUL"),
        }
    }
}

/// Column metadata in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Full declared type, e.g. `varchar(255)` or `int unsigned`
    pub declared_type: String,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Index role
    pub key_role: KeyRole,
    /// Default expression, if any
    pub default_value: Option<String>,
    /// Extra attributes such as `auto_increment`
    pub extra: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a nullable column with no key, default or extra attributes.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            nullable: true,
            key_role: KeyRole::None,
            default_value: None,
            extra: None,
        }
    }

    /// Builder method to set nullability.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder method to set the key role.
    pub fn with_key_role(mut self, key_role: KeyRole) -> Self {
        self.key_role = key_role;
        self
    }

    /// Builder method to set the default expression.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Builder method to set extra attributes.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// True when `extra` mentions `auto_increment`.
    pub fn is_auto_increment(&self) -> bool {
        self.extra
            .as_deref()
            .is_some_and(|extra| extra.to_lowercase().contains("auto_increment"))
    }
}

/// Schema metadata for a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProfile {
    /// Database (schema) name
    pub database: String,
    /// Table name
    pub table: String,
    /// Table comment, or [`NO_DESCRIPTION`]
    pub description: String,
    /// Exact row count
    pub row_count: u64,
    /// Columns in ordinal order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableProfile {
    /// Qualified `database.table` name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }
}

/// A single scalar read from a sampled row.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// SQL NULL
    Null,
    /// Character data
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer
    Unsigned(u64),
    /// Floating point number
    Float(f64),
    /// Exact numeric kept in its textual form
    Decimal(String),
    /// Calendar date
    Date(chrono::NaiveDate),
    /// Time of day
    Time(chrono::NaiveTime),
    /// Date and time without zone
    DateTime(chrono::NaiveDateTime),
    /// Binary data
    Bytes(Vec<u8>),
}

impl SampleValue {
    /// True for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for values rendered as escaped, truncated string cells.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Bytes(_))
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Text(s) | Self::Decimal(s) => write!(f, "{}", s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Unsigned(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", d),
            Self::Time(t) => write!(f, "{}", t),
            Self::DateTime(dt) => write!(f, "{}", dt),
            Self::Bytes(bytes) => write!(
                f,
                "base64:{}",
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ),
        }
    }
}

impl From<&str> for SampleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SampleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SampleValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// One sampled row, positionally aligned with [`TableSample::columns`].
pub type SampleRow = Vec<SampleValue>;

/// How sampled rows were ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingStrategy {
    /// Descending by an auto-increment column
    AutoIncrement {
        /// Column name
        column: String,
    },
    /// Descending by the first primary-key column
    PrimaryKey {
        /// Column name
        column: String,
    },
    /// Scan order; not deterministic across runs
    Unordered,
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoIncrement { column } => write!(f, "auto-increment `{}`", column),
            Self::PrimaryKey { column } => write!(f, "primary key `{}`", column),
            Self::Unordered => write!(f, "unordered"),
        }
    }
}

/// Rows returned by the sample query.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSample {
    /// Column names in the order the sample query returned them
    pub columns: Vec<String>,
    /// Sampled rows
    pub rows: Vec<SampleRow>,
    /// Ordering used for the query
    pub ordering: OrderingStrategy,
}

impl TableSample {
    /// A sample with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            ordering: OrderingStrategy::Unordered,
        }
    }

    /// True when no rows were returned.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

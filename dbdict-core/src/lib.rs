//! Core library for dbdict, a MySQL data dictionary generator.
//!
//! The crate connects to a MySQL server, describes every user table,
//! samples its most recent rows and writes one markdown page per table.
//! Sampled values that look like personal data are partially masked
//! before they reach the page.
//!
//! # Security Guarantees
//! - Database sessions are read-only
//! - Credentials live in zeroizing containers and are never logged
//! - PII masking is applied to every sampled value unless explicitly disabled
//!
//! # Architecture
//! - [`pii`]: column-name and content heuristics plus masking transforms
//! - [`adapters`]: the `DatabaseAdapter` trait and its MySQL implementation
//! - [`report`]: markdown rendering
//! - [`dictionary`]: the driver that ties them together

pub mod adapters;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod logging;
pub mod models;
pub mod pii;
pub mod report;
pub mod security;

// Re-export commonly used types
pub use adapters::DatabaseAdapter;
pub use config::{ConnectionConfig, GenerationConfig};
pub use dictionary::{DataDictionary, GenerationSummary};
pub use error::{DbDictError, Result};
pub use logging::init_logging;
pub use models::{
    ColumnDescriptor, KeyRole, OrderingStrategy, SampleRow, SampleValue, TableProfile,
    TableSample,
};
pub use pii::{ContentKind, PiiCategory, PiiGuard};
pub use security::Credentials;

//! Configuration values consumed by the core.
//!
//! - `ConnectionConfig`: where to connect (never credentials)
//! - `GenerationConfig`: output directory, PII toggle, database allow-list, sample size
//!
//! Both are plain immutable values; resolving them from the environment or
//! interactive prompts happens in the binary crate.

mod connection;
mod generation;

pub use connection::{ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use generation::{DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_SIZE, GenerationConfig};

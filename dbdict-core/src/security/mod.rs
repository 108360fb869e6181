//! Credential handling.
//!
//! - `credentials`: login container that zeros its memory on drop
//! - `connection`: `mysql://` URL parsing with credential extraction
//!
//! Passwords never reach logs, error messages or `Debug` output.

mod connection;
mod credentials;

pub use connection::{ParsedConnection, parse_connection_string};
pub use credentials::Credentials;

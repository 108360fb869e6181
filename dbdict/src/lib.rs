//! Library module for the dbdict binary
//!
//! Command-line parsing and settings resolution live here so they can be
//! exercised by integration tests. The process entry point is in main.rs.

pub mod cli;
pub mod settings;

pub use cli::Cli;
pub use settings::{ConfigResolver, EnvResolver, InteractiveResolver, Prompter, ResolvedSettings};

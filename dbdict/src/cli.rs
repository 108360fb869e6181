//! Command-line interface definition.

use clap::{Args, Parser};
use std::path::PathBuf;

/// CLI argument structure
#[derive(Parser, Debug)]
#[command(name = "dbdict")]
#[command(about = "MySQL data dictionary generator with PII masking")]
#[command(version)]
#[command(long_about = "
dbdict - MySQL data dictionary generator

Connects to a MySQL server, describes every user table, samples its most
recent rows and writes one markdown file per table.

SECURITY FEATURES:
- Read-only database session
- Credentials never logged
- PII masking of sampled values (disable with --pii-protection false)

Values missing from flags and environment are prompted for unless
--non-interactive is given.

EXAMPLES:
  dbdict --host db.internal --user reader
  dbdict --database-url mysql://reader@localhost/shop --non-interactive
  DB_USER=reader DB_PASSWORD=secret dbdict --databases shop,crm --sample-size 10
")]
pub struct Cli {
    /// Verbosity flags
    #[command(flatten)]
    pub global: GlobalArgs,

    /// MySQL host
    #[arg(long, env = "DB_HOST", help = "MySQL host (falls back to MYSQL_HOST)")]
    pub host: Option<String>,

    /// MySQL port, kept as text so bad values can fall back to the default
    #[arg(long, env = "DB_PORT", help = "MySQL port (falls back to MYSQL_PORT)")]
    pub port: Option<String>,

    /// Login name
    #[arg(long, env = "DB_USER", help = "MySQL username (falls back to MYSQL_USER)")]
    pub user: Option<String>,

    /// Login password
    #[arg(
        long,
        env = "DB_PASSWORD",
        hide_env_values = true,
        help = "MySQL password (falls back to MYSQL_PASSWORD)"
    )]
    pub password: Option<String>,

    /// Connection URL overriding host, port, user and password
    #[arg(
        long,
        env = "DATABASE_URL",
        hide_env_values = true,
        help = "MySQL connection string (credentials will be sanitized in logs)"
    )]
    pub database_url: Option<String>,

    /// Output directory
    #[arg(
        long,
        env = "OUTPUT_DIR",
        help = "Directory receiving one markdown file per table [default: data_dictionary]"
    )]
    pub output_dir: Option<PathBuf>,

    /// PII protection toggle
    #[arg(
        long,
        env = "PII_PROTECTION",
        value_name = "BOOL",
        help = "Mask PII in sample data (true/1/yes/on enable, anything else disables)"
    )]
    pub pii_protection: Option<String>,

    /// Database allow-list
    #[arg(
        long,
        env = "DB_DATABASES",
        value_delimiter = ',',
        help = "Comma-separated list of databases to document (default: all user databases)"
    )]
    pub databases: Vec<String>,

    /// Rows sampled per table
    #[arg(
        long,
        env = "SAMPLE_SIZE",
        default_value_t = dbdict_core::config::DEFAULT_SAMPLE_SIZE,
        help = "Number of most recent rows to sample per table"
    )]
    pub sample_size: u32,

    /// Never prompt
    #[arg(
        long,
        help = "Fail instead of prompting when a required value is missing"
    )]
    pub non_interactive: bool,
}

/// Logging flags shared by every invocation
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

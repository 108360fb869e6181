//! Settings that shape a dictionary run.

use std::path::PathBuf;

/// Default directory for generated markdown files.
pub const DEFAULT_OUTPUT_DIR: &str = "data_dictionary";

/// Default number of sample rows per table.
pub const DEFAULT_SAMPLE_SIZE: u32 = 5;

/// Immutable settings for one dictionary run.
///
/// Built once by the binary and passed by reference into the driver and the
/// masking components, which never read process state themselves.
///
/// # Example
/// ```rust
/// use dbdict_core::config::GenerationConfig;
///
/// let config = GenerationConfig::new()
///     .with_pii_protection(false)
///     .with_databases(vec!["shop".to_string()]);
///
/// assert!(config.is_database_selected("shop"));
/// assert!(!config.is_database_selected("crm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Directory receiving one markdown file per table
    pub output_dir: PathBuf,
    /// Mask PII in samples and add PII sections to reports
    pub pii_protection: bool,
    /// Restrict processing to these databases; empty means all
    pub databases: Vec<String>,
    /// Maximum rows sampled per table
    pub sample_size: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pii_protection: true,
            databases: Vec::new(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl GenerationConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builder method to enable/disable PII protection.
    pub fn with_pii_protection(mut self, enabled: bool) -> Self {
        self.pii_protection = enabled;
        self
    }

    /// Builder method to set the database allow-list.
    ///
    /// Blank entries are dropped and names are trimmed.
    pub fn with_databases(mut self, databases: Vec<String>) -> Self {
        self.databases = databases
            .into_iter()
            .map(|db| db.trim().to_string())
            .filter(|db| !db.is_empty())
            .collect();
        self
    }

    /// Builder method to set the sample size.
    pub fn with_sample_size(mut self, size: u32) -> Self {
        self.sample_size = size;
        self
    }

    /// True when `database` passes the allow-list.
    pub fn is_database_selected(&self, database: &str) -> bool {
        self.databases.is_empty() || self.databases.iter().any(|db| db == database)
    }

    /// Validates generation settings.
    ///
    /// # Errors
    /// Returns error if the output directory is empty or the sample size is zero
    pub fn validate(&self) -> crate::Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(crate::error::DbDictError::configuration(
                "output directory cannot be empty",
            ));
        }

        if self.sample_size == 0 {
            return Err(crate::error::DbDictError::configuration(
                "sample size must be greater than 0",
            ));
        }

        Ok(())
    }
}

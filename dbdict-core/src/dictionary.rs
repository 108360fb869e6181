//! Orchestration of a full dictionary run.
//!
//! One [`DataDictionary`] owns the adapter for the whole run. Databases and
//! tables are processed strictly one after another; per-table failures are
//! logged and skipped, while failures that affect every table abort the run.
//! The connection is closed on every exit path of [`DataDictionary::run`].

use std::path::{Path, PathBuf};

use crate::Result;
use crate::adapters::DatabaseAdapter;
use crate::config::GenerationConfig;
use crate::error::DbDictError;
use crate::models::TableSample;
use crate::pii::PiiGuard;
use crate::report::{render_table_report, report_file_name};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Databases visited after allow-list filtering
    pub databases: usize,
    /// Markdown files written
    pub tables_written: usize,
    /// Tables skipped because they could not be described
    pub tables_skipped: usize,
    /// Directory the files were written to
    pub output_dir: PathBuf,
}

/// Generates one markdown file per table reachable through an adapter.
///
/// # Example
/// ```rust,no_run
/// use dbdict_core::adapters::mysql::MySqlAdapter;
/// use dbdict_core::config::{ConnectionConfig, GenerationConfig};
/// use dbdict_core::dictionary::DataDictionary;
/// use dbdict_core::security::Credentials;
///
/// # async fn example() -> dbdict_core::Result<()> {
/// let creds = Credentials::new("reader".to_string(), Some("secret".to_string()));
/// let adapter = MySqlAdapter::connect(ConnectionConfig::default(), &creds).await?;
///
/// let summary = DataDictionary::new(Box::new(adapter), GenerationConfig::default())
///     .run()
///     .await?;
/// println!("{} tables documented", summary.tables_written);
/// # Ok(())
/// # }
/// ```
pub struct DataDictionary {
    adapter: Box<dyn DatabaseAdapter>,
    config: GenerationConfig,
    guard: PiiGuard,
}

impl DataDictionary {
    /// Creates a generator; masking follows `config.pii_protection`.
    pub fn new(adapter: Box<dyn DatabaseAdapter>, config: GenerationConfig) -> Self {
        let guard = PiiGuard::new(config.pii_protection);
        Self {
            adapter,
            config,
            guard,
        }
    }

    /// Runs the generation and closes the connection afterwards, whether
    /// or not generation succeeded.
    ///
    /// # Errors
    /// Returns error if the output directory cannot be created, databases
    /// cannot be listed, or a report cannot be rendered or written
    pub async fn run(self) -> Result<GenerationSummary> {
        let result = self.generate().await;
        self.adapter.close().await;
        result
    }

    async fn generate(&self) -> Result<GenerationSummary> {
        if self.guard.is_enabled() {
            tracing::info!("🛡️  PII Protection: ENABLED");
        } else {
            tracing::warn!("⚠️  PII Protection: DISABLED");
        }

        let output_dir = self.config.output_dir.as_path();
        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            DbDictError::io(
                format!("Failed to create output directory {}", output_dir.display()),
                e,
            )
        })?;

        let databases: Vec<String> = self
            .adapter
            .list_databases()
            .await?
            .into_iter()
            .filter(|db| self.config.is_database_selected(db))
            .collect();

        tracing::info!("Found {} databases to process", databases.len());

        let mut summary = GenerationSummary {
            databases: databases.len(),
            tables_written: 0,
            tables_skipped: 0,
            output_dir: output_dir.to_path_buf(),
        };

        for database in &databases {
            tracing::info!("Processing database: {}", database);

            let tables = match self.adapter.list_tables(database).await {
                Ok(tables) => tables,
                Err(e) => {
                    tracing::warn!("Skipping database {}: {}", database, e);
                    continue;
                }
            };

            for table in &tables {
                if self.document_table(database, table, output_dir).await? {
                    summary.tables_written = summary.tables_written.saturating_add(1);
                } else {
                    summary.tables_skipped = summary.tables_skipped.saturating_add(1);
                }
            }
        }

        tracing::info!(
            "Data dictionary generation completed: {} files written, {} tables skipped",
            summary.tables_written,
            summary.tables_skipped
        );

        Ok(summary)
    }

    /// Documents one table. Returns `Ok(false)` when the table was skipped.
    async fn document_table(&self, database: &str, table: &str, output_dir: &Path) -> Result<bool> {
        tracing::info!("  Processing table: {}", table);

        let profile = match self.adapter.describe_table(database, table).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to describe {}.{}: {}", database, table, e);
                return Ok(false);
            }
        };

        let sample = match self
            .adapter
            .sample_rows(database, table, self.config.sample_size)
            .await
        {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!("Failed to sample {}.{}: {}", database, table, e);
                TableSample::empty()
            }
        };

        let protected = self.guard.protect_sample(sample);
        if !protected.pii_columns.is_empty() {
            tracing::info!(
                "    🛡️  PII columns detected and masked: {}",
                protected.pii_columns.join(", ")
            );
        }

        let generated_at = chrono::Local::now().naive_local();
        let markdown = render_table_report(&profile, &protected.sample, self.guard, generated_at)?;

        let path = output_dir.join(report_file_name(database, table));
        tokio::fs::write(&path, markdown)
            .await
            .map_err(|e| DbDictError::io(format!("Failed to write {}", path.display()), e))?;

        tracing::info!("    Generated: {}", path.display());
        Ok(true)
    }
}

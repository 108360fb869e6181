//! MySQL data dictionary generator.
//!
//! This binary connects to a MySQL server and writes one markdown file per
//! user table, describing its columns and showing a handful of recent rows
//! with PII masked.
//!
//! # Security Guarantees
//! - Read-only database session
//! - No credentials stored or logged
//! - Sampled values masked unless PII protection is explicitly disabled

use anyhow::Context;
use clap::Parser;
use dbdict::{Cli, ConfigResolver, EnvResolver, InteractiveResolver, ResolvedSettings};
use dbdict_core::adapters::DatabaseAdapter;
use dbdict_core::adapters::mysql::MySqlAdapter;
use dbdict_core::{DataDictionary, GenerationSummary, init_logging};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    info!("MySQL Data Dictionary Generator v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(summary) => {
            let output_dir = std::path::absolute(&summary.output_dir)
                .unwrap_or_else(|_| summary.output_dir.clone());
            println!();
            println!("✅ Data dictionary generated successfully!");
            println!("Total tables processed: {}", summary.tables_written);
            if summary.tables_skipped > 0 {
                println!("Tables skipped: {}", summary.tables_skipped);
            }
            println!("Files saved to: {}", output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            println!();
            println!("❌ Failed to generate data dictionary.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<GenerationSummary> {
    // Prompts block on stdin, so settings are resolved before the runtime starts
    let settings = if cli.non_interactive {
        EnvResolver.resolve(cli)
    } else {
        InteractiveResolver::terminal().resolve(cli)
    }
    .context("Failed to resolve configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(generate(settings))
}

async fn generate(settings: ResolvedSettings) -> anyhow::Result<GenerationSummary> {
    let ResolvedSettings {
        connection,
        credentials,
        generation,
    } = settings;

    let adapter = MySqlAdapter::connect(connection, &credentials)
        .await
        .context("Failed to connect to MySQL")?;
    drop(credentials);

    if let Err(e) = adapter.test_connection().await {
        adapter.close().await;
        return Err(e).context("Connection test failed");
    }

    DataDictionary::new(Box::new(adapter), generation)
        .run()
        .await
        .context("Data dictionary generation failed")
}

//! Driver tests against an in-memory adapter.

use async_trait::async_trait;
use dbdict_core::adapters::DatabaseAdapter;
use dbdict_core::config::GenerationConfig;
use dbdict_core::dictionary::DataDictionary;
use dbdict_core::error::DbDictError;
use dbdict_core::models::{
    ColumnDescriptor, KeyRole, OrderingStrategy, SampleValue, TableProfile, TableSample,
};
use dbdict_core::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

#[derive(Default)]
struct FakeAdapter {
    databases: Vec<String>,
    tables: HashMap<String, Vec<String>>,
    fail_list_databases: bool,
    fail_list_tables: HashSet<String>,
    fail_describe: HashSet<String>,
    fail_sample: HashSet<String>,
    closed: Arc<AtomicBool>,
}

fn query_error(context: &str) -> DbDictError {
    DbDictError::query_failed(context.to_string())
}

fn customers_profile(database: &str, table: &str) -> TableProfile {
    TableProfile {
        database: database.to_string(),
        table: table.to_string(),
        description: "No description available".to_string(),
        row_count: 2,
        columns: vec![
            ColumnDescriptor::new("id", "int")
                .with_nullable(false)
                .with_key_role(KeyRole::Primary)
                .with_extra("auto_increment"),
            ColumnDescriptor::new("email", "varchar(255)"),
            ColumnDescriptor::new("notes", "text"),
        ],
    }
}

fn customers_sample() -> TableSample {
    TableSample {
        columns: vec!["id".into(), "email".into(), "notes".into()],
        rows: vec![
            vec![
                SampleValue::Integer(2),
                SampleValue::from("alice@example.com"),
                SampleValue::from("call 555-123-4567"),
            ],
            vec![
                SampleValue::Integer(1),
                SampleValue::from("bob@example.org"),
                SampleValue::Null,
            ],
        ],
        ordering: OrderingStrategy::AutoIncrement {
            column: "id".into(),
        },
    }
}

#[async_trait]
impl DatabaseAdapter for FakeAdapter {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        if self.fail_list_databases {
            return Err(query_error("SHOW DATABASES denied"));
        }
        Ok(self.databases.clone())
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        if self.fail_list_tables.contains(database) {
            return Err(query_error("table listing denied"));
        }
        Ok(self.tables.get(database).cloned().unwrap_or_default())
    }

    async fn describe_table(&self, database: &str, table: &str) -> Result<TableProfile> {
        if self.fail_describe.contains(table) {
            return Err(query_error("describe failed"));
        }
        Ok(customers_profile(database, table))
    }

    async fn sample_rows(&self, _database: &str, table: &str, limit: u32) -> Result<TableSample> {
        if self.fail_sample.contains(table) {
            return Err(query_error("sample failed"));
        }
        let mut sample = customers_sample();
        sample.rows.truncate(limit as usize);
        Ok(sample)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

fn adapter() -> FakeAdapter {
    FakeAdapter {
        databases: vec!["shop".to_string(), "crm".to_string()],
        tables: HashMap::from([
            (
                "shop".to_string(),
                vec!["customers".to_string(), "orders".to_string()],
            ),
            ("crm".to_string(), vec!["contacts".to_string()]),
        ]),
        ..Default::default()
    }
}

fn config(dir: &TempDir) -> GenerationConfig {
    GenerationConfig::new().with_output_dir(dir.path().join("dictionary"))
}

#[tokio::test]
async fn test_generates_one_file_per_table() {
    let dir = TempDir::new().unwrap();
    let adapter = adapter();
    let closed = Arc::clone(&adapter.closed);

    let summary = DataDictionary::new(Box::new(adapter), config(&dir))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.databases, 2);
    assert_eq!(summary.tables_written, 3);
    assert_eq!(summary.tables_skipped, 0);
    assert!(closed.load(Ordering::SeqCst));

    let out = dir.path().join("dictionary");
    for name in ["shop.customers.md", "shop.orders.md", "crm.contacts.md"] {
        assert!(out.join(name).is_file(), "missing {}", name);
    }

    let md = std::fs::read_to_string(out.join("shop.customers.md")).unwrap();
    assert!(md.starts_with("# shop.customers\n"));
    assert!(md.contains("sensitive columns: email  \n"));
    assert!(md.contains("| 2 | a***@e***.com | ***-***-4567 |\n"));
    assert!(md.contains("| 1 | b***@e***.org | NULL |\n"));
    assert!(!md.contains("alice@example.com"));
    assert!(md.ends_with("*Documentation generated by MySQL Data Dictionary Generator with PII Protection*\n"));
}

#[tokio::test]
async fn test_allow_list_filters_databases() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir).with_databases(vec!["crm".to_string()]);

    let summary = DataDictionary::new(Box::new(adapter()), config)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.databases, 1);
    assert_eq!(summary.tables_written, 1);
    assert!(!summary.output_dir.join("shop.customers.md").exists());
    assert!(summary.output_dir.join("crm.contacts.md").exists());
}

#[tokio::test]
async fn test_describe_failure_skips_table() {
    let dir = TempDir::new().unwrap();
    let mut adapter = adapter();
    adapter.fail_describe.insert("orders".to_string());

    let summary = DataDictionary::new(Box::new(adapter), config(&dir))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.tables_written, 2);
    assert_eq!(summary.tables_skipped, 1);
    assert!(!summary.output_dir.join("shop.orders.md").exists());
}

#[tokio::test]
async fn test_sample_failure_writes_empty_sample() {
    let dir = TempDir::new().unwrap();
    let mut adapter = adapter();
    adapter.fail_sample.insert("customers".to_string());

    let summary = DataDictionary::new(Box::new(adapter), config(&dir))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.tables_written, 3);
    let md = std::fs::read_to_string(summary.output_dir.join("shop.customers.md")).unwrap();
    assert!(md.contains("(Latest 0 rows)\n\n*No data available*\n"));
}

#[tokio::test]
async fn test_table_listing_failure_skips_database() {
    let dir = TempDir::new().unwrap();
    let mut adapter = adapter();
    adapter.fail_list_tables.insert("shop".to_string());

    let summary = DataDictionary::new(Box::new(adapter), config(&dir))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.databases, 2);
    assert_eq!(summary.tables_written, 1);
}

#[tokio::test]
async fn test_database_listing_failure_aborts_and_closes() {
    let dir = TempDir::new().unwrap();
    let mut adapter = adapter();
    adapter.fail_list_databases = true;
    let closed = Arc::clone(&adapter.closed);

    let result = DataDictionary::new(Box::new(adapter), config(&dir)).run().await;

    assert!(result.is_err());
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_unwritable_output_dir_aborts_and_closes() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "occupied").unwrap();

    let adapter = adapter();
    let closed = Arc::clone(&adapter.closed);
    let config = GenerationConfig::new().with_output_dir(blocker.join("dictionary"));

    let result = DataDictionary::new(Box::new(adapter), config).run().await;

    assert!(matches!(result, Err(DbDictError::Io { .. })));
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_disabled_protection_keeps_raw_values() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir)
        .with_pii_protection(false)
        .with_databases(vec!["shop".to_string()]);

    let summary = DataDictionary::new(Box::new(adapter()), config)
        .run()
        .await
        .unwrap();

    let md = std::fs::read_to_string(summary.output_dir.join("shop.customers.md")).unwrap();
    assert!(md.contains("| 2 | alice@example.com | call 555-123-4567 |\n"));
    assert!(!md.contains("PII"));
}

#[tokio::test]
async fn test_sample_size_is_forwarded() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir)
        .with_sample_size(1)
        .with_databases(vec!["crm".to_string()]);

    let summary = DataDictionary::new(Box::new(adapter()), config)
        .run()
        .await
        .unwrap();

    let md = std::fs::read_to_string(summary.output_dir.join("crm.contacts.md")).unwrap();
    assert!(md.contains("(Latest 1 rows)"));
    assert!(!md.contains("| 1 | b***@e***.org | NULL |"));
}

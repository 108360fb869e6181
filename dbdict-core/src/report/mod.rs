//! Markdown rendering of one table's dictionary entry.
//!
//! The page layout lives in `templates/table_report.md`; this module
//! precomputes every line the template prints so the template itself only
//! decides which sections appear.

mod format;

use askama::Template;
use chrono::NaiveDateTime;

use crate::Result;
use crate::error::DbDictError;
use crate::models::{TableProfile, TableSample};
use crate::pii::PiiGuard;

pub use format::{
    MAX_CELL_CHARS, escape_cell, format_sample_cell, format_thousands, markdown_row,
    report_file_name,
};

const GENERATOR: &str = "MySQL Data Dictionary Generator";
const GENERATOR_WITH_PII: &str = "MySQL Data Dictionary Generator with PII Protection";

#[derive(Template)]
#[template(path = "table_report.md", escape = "none")]
struct TableReport {
    title: String,
    generated_on: String,
    pii_enabled: bool,
    pii_column_list: String,
    pii_column_count: usize,
    database: String,
    table: String,
    description: String,
    total_rows: String,
    column_header: String,
    column_separator: String,
    column_rows: Vec<String>,
    protection_note: &'static str,
    sample_count: usize,
    sample_lines: Vec<String>,
    generator: &'static str,
}

fn column_rows(profile: &TableProfile, guard: PiiGuard) -> Vec<String> {
    profile
        .columns
        .iter()
        .map(|column| {
            let mut cells = vec![
                column.name.clone(),
                column.declared_type.clone(),
                if column.nullable { "Yes" } else { "No" }.to_string(),
                column.key_role.marker().unwrap_or("-").to_string(),
                column.default_value.clone().unwrap_or_else(|| "-".to_string()),
                column.extra.clone().unwrap_or_else(|| "-".to_string()),
            ];
            if guard.is_enabled() {
                let risk = if guard.is_pii_column(&column.name) {
                    "⚠️ HIGH"
                } else {
                    "✅ LOW"
                };
                cells.push(risk.to_string());
            }
            markdown_row(cells)
        })
        .collect()
}

fn sample_lines(sample: &TableSample) -> Vec<String> {
    if sample.rows.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(sample.rows.len().saturating_add(2));
    lines.push(markdown_row(&sample.columns));
    lines.push(markdown_row(vec!["---"; sample.columns.len()]));
    lines.extend(
        sample
            .rows
            .iter()
            .map(|row| markdown_row(row.iter().map(format_sample_cell))),
    );
    lines
}

/// Renders the markdown document for one table.
///
/// `sample` should already be masked when protection is on. The banner and
/// summary name the PII-flagged columns from the table's own column list,
/// not from the sample. The result always ends with exactly one newline.
///
/// # Errors
/// Returns [`DbDictError::Render`] if the template engine fails
pub fn render_table_report(
    profile: &TableProfile,
    sample: &TableSample,
    guard: PiiGuard,
    generated_at: NaiveDateTime,
) -> Result<String> {
    let pii_columns = guard.flagged_columns(profile.columns.iter().map(|c| c.name.as_str()));

    let mut header = vec![
        "Column Name",
        "Data Type",
        "Nullable",
        "Key",
        "Default",
        "Extra",
    ];
    let mut separator = vec![
        "-------------",
        "-----------",
        "----------",
        "-----",
        "---------",
        "-------",
    ];
    if guard.is_enabled() {
        header.push("PII Risk");
        separator.push("----------");
    }

    let report = TableReport {
        title: profile.qualified_name(),
        generated_on: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        pii_enabled: guard.is_enabled(),
        pii_column_list: pii_columns.join(", "),
        pii_column_count: pii_columns.len(),
        database: profile.database.clone(),
        table: profile.table.clone(),
        description: profile.description.clone(),
        total_rows: format_thousands(profile.row_count),
        column_header: markdown_row(header),
        column_separator: format!("|{}|", separator.join("|")),
        column_rows: column_rows(profile, guard),
        protection_note: if guard.is_enabled() {
            " (PII Protected)"
        } else {
            ""
        },
        sample_count: sample.rows.len(),
        sample_lines: sample_lines(sample),
        generator: if guard.is_enabled() {
            GENERATOR_WITH_PII
        } else {
            GENERATOR
        },
    };

    let rendered = report.render().map_err(|source| DbDictError::Render {
        table: profile.qualified_name(),
        source,
    })?;

    Ok(format!("{}\n", rendered.trim_end_matches('\n')))
}

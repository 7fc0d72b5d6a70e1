//! Output of the computed summaries.
//!
//! Supports logging the tables, JSON serialization, and CSV/JSON export.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::SummaryTable;
use crate::context::ReportContext;
use crate::parser::LoadReport;
use csv::WriterBuilder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Everything `export` writes to `summaries.json`.
#[derive(Serialize)]
pub struct SummaryExport<'a> {
    pub source: &'a str,
    pub generated_at: DateTime<Utc>,
    pub load: &'a LoadReport,
    pub tables: Vec<&'a SummaryTable>,
}

impl<'a> SummaryExport<'a> {
    pub fn from_context(context: &'a ReportContext) -> Self {
        Self {
            source: context.source(),
            generated_at: context.generated_at(),
            load: context.report(),
            tables: context.summaries().iter().map(|(_, t)| t).collect(),
        }
    }
}

/// Logs every summary table, one line per group.
pub fn print_pretty(context: &ReportContext) {
    for (_, table) in context.summaries().iter() {
        info!(
            summary = table.name,
            keys = ?table.key_columns,
            values = ?table.value_columns,
            groups = table.len(),
            "Summary"
        );
        for row in &table.rows {
            info!(summary = table.name, key = ?row.key, values = ?row.values);
        }
    }
}

/// Logs all summaries as pretty-printed JSON.
pub fn print_json(context: &ReportContext) -> Result<()> {
    info!(
        "{}",
        serde_json::to_string_pretty(&SummaryExport::from_context(context))?
    );
    Ok(())
}

/// Writes one summary table as a `;`-delimited CSV file with a header row.
///
/// Missing cells are written empty.
pub fn write_table_csv(path: &Path, table: &SummaryTable) -> Result<()> {
    debug!(path = %path.display(), summary = table.name, "Writing summary CSV");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(file);

    writer.write_record(table.key_columns.iter().chain(table.value_columns.iter()))?;
    for row in &table.rows {
        let values = row
            .values
            .iter()
            .map(|v| v.map(|v| v.to_string()).unwrap_or_default());
        writer.write_record(row.key.iter().cloned().chain(values))?;
    }
    writer.flush()?;

    Ok(())
}

/// Exports every summary into `dir`: one `<name>.csv` per table plus a
/// `summaries.json` with all of them. Returns the written paths.
#[tracing::instrument(skip(dir, context), fields(dir = %dir.display()))]
pub fn export_all(dir: &Path, context: &ReportContext) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    for (_, table) in context.summaries().iter() {
        let path = dir.join(format!("{}.csv", table.name));
        write_table_csv(&path, table)?;
        written.push(path);
    }

    let json_path = dir.join("summaries.json");
    let body = serde_json::to_vec_pretty(&SummaryExport::from_context(context))?;
    fs::write(&json_path, body).with_context(|| format!("writing {}", json_path.display()))?;
    written.push(json_path);

    info!(files = written.len(), "Summaries exported");
    Ok(written)
}

//! Immutable report state shared by every presenter call.
//!
//! A [`ReportContext`] is built exactly once at startup: the file is loaded,
//! the seven summaries are computed, and the result is never mutated again.
//! There is no reload or teardown path; the context lives until the process
//! exits.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::analyzers::summaries::{Summaries, SummaryId};
use crate::analyzers::types::SummaryTable;
use crate::error::LoadError;
use crate::parser::{Dataset, LoadReport, load_records};

#[derive(Debug, Clone)]
pub struct ReportContext {
    source: String,
    generated_at: DateTime<Utc>,
    dataset: Dataset,
    summaries: Summaries,
}

impl ReportContext {
    /// Loads `path` and computes every summary.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let source = path.as_ref().display().to_string();
        let dataset = load_records(path)?;
        Ok(Self::from_dataset(source, dataset))
    }

    pub fn from_dataset(source: impl Into<String>, dataset: Dataset) -> Self {
        let summaries = Summaries::compute(&dataset.records);
        let source = source.into();

        info!(
            source = %source,
            records = dataset.records.len(),
            "Report summaries computed"
        );

        Self {
            source,
            generated_at: Utc::now(),
            dataset,
            summaries,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn report(&self) -> &LoadReport {
        &self.dataset.report
    }

    pub fn record_count(&self) -> usize {
        self.dataset.records.len()
    }

    pub fn summaries(&self) -> &Summaries {
        &self.summaries
    }

    pub fn summary(&self, id: SummaryId) -> &SummaryTable {
        self.summaries.get(id)
    }
}

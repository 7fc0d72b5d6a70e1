use serde::Serialize;

use crate::analyzers::types::SummaryTable;

/// Row-oriented rendering of a summary table: key columns first, then the
/// averaged columns, one row per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableCell {
    Text(String),
    Number(Option<f64>),
}

impl TableCell {
    /// Cell text for HTML output. Missing numbers render empty.
    pub fn display(&self) -> String {
        match self {
            TableCell::Text(text) => text.clone(),
            TableCell::Number(Some(value)) => format!("{value:.2}"),
            TableCell::Number(None) => String::new(),
        }
    }
}

impl TableView {
    pub fn from_summary(table: &SummaryTable) -> Self {
        let columns = table
            .key_columns
            .iter()
            .chain(table.value_columns.iter())
            .copied()
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|row| {
                row.key
                    .iter()
                    .cloned()
                    .map(TableCell::Text)
                    .chain(row.values.iter().copied().map(TableCell::Number))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }
}

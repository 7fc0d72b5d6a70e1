//! Data types produced by the aggregation pipeline.

use serde::Serialize;

/// One group of a summary table: the key tuple and one mean per value column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Grouped means of one or more columns.
///
/// Rows are sorted ascending by key tuple. Each row holds exactly one value
/// per entry of `value_columns`; a value is `None` when the group had no
/// usable input for that column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub name: &'static str,
    pub key_columns: Vec<&'static str>,
    pub value_columns: Vec<&'static str>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row with the given key tuple.
    pub fn row(&self, key: &[&str]) -> Option<&SummaryRow> {
        self.rows
            .iter()
            .find(|row| row.key.iter().map(String::as_str).eq(key.iter().copied()))
    }

    /// Mean of `column` for the group `key`; `None` if either is unknown or
    /// the cell is missing.
    pub fn value(&self, key: &[&str], column: &str) -> Option<f64> {
        let idx = self.value_index(column)?;
        self.row(key)?.values[idx]
    }

    pub fn value_index(&self, column: &str) -> Option<usize> {
        self.value_columns.iter().position(|c| *c == column)
    }

    /// Values of one column in row order.
    pub fn column(&self, column: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.value_index(column)?;
        Some(self.rows.iter().map(|row| row.values[idx]).collect())
    }

    /// Key tuples in row order.
    pub fn keys(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|row| row.key.as_slice())
    }
}

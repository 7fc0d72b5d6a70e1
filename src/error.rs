//! Errors raised while loading the measurement file.
//!
//! Only structural problems surface here. Per-cell parse failures never do;
//! they become missing values on the record.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input has no header row")]
    MissingHeader,

    #[error("input header is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

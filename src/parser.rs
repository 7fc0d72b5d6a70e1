//! Reader for the `;`-delimited, decimal-comma measurement file.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::record::{KeyColumn, LoadRecord, Measure};

/// Cell texts treated as an explicit "no value".
const NULL_MARKERS: &[&str] = &["na", "n/a", "nan", "null", "none", "-"];

/// Parses a number written with the decimal-comma convention.
///
/// When the text holds a comma, dots are thousands separators
/// (`"1.234,5"` is 1234.5). Without a comma the text is parsed as-is.
/// Returns `None` for empty cells, null markers, unparseable text and
/// non-finite results.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if is_missing(text) {
        return None;
    }

    let value = if text.contains(',') {
        text.replace('.', "").replace(',', ".").parse::<f64>()
    } else {
        text.parse::<f64>()
    };

    value.ok().filter(|v| v.is_finite())
}

fn is_missing(text: &str) -> bool {
    text.is_empty() || NULL_MARKERS.iter().any(|m| text.eq_ignore_ascii_case(m))
}

/// Decodes a cell as UTF-8, or as Latin-1 when it is not valid UTF-8.
/// Latin-1 maps every byte to its own character, so distinct cells stay
/// distinct.
fn decode_text(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(raw.iter().copied().map(char::from).collect()),
    }
}

/// Counters collected while loading.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_skipped: usize,
    /// Missing cells per numeric column, derived ratio included.
    pub missing_values: BTreeMap<&'static str, usize>,
    /// Missing cells per grouping column.
    pub missing_keys: BTreeMap<&'static str, usize>,
}

/// The normalized record set together with its load counters.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    pub records: Vec<LoadRecord>,
    pub report: LoadReport,
}

/// Header positions of every required column.
struct ColumnIndex {
    keys: Vec<(KeyColumn, usize)>,
    measures: Vec<(Measure, usize)>,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers.iter().map(clean_header).collect();
        if names.iter().all(|n| n.is_empty()) {
            return Err(LoadError::MissingHeader);
        }

        let position = |name: &str| names.iter().position(|n| n == name);
        let mut missing = Vec::new();

        let keys = KeyColumn::ALL
            .iter()
            .filter_map(|column| match position(column.name()) {
                Some(idx) => Some((*column, idx)),
                None => {
                    missing.push(column.name().to_string());
                    None
                }
            })
            .collect();

        let measures = Measure::PARSED
            .iter()
            .filter_map(|measure| match position(measure.name()) {
                Some(idx) => Some((*measure, idx)),
                None => {
                    missing.push(measure.name().to_string());
                    None
                }
            })
            .collect();

        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        Ok(Self { keys, measures })
    }

    fn decode(&self, row: &ByteRecord, report: &mut LoadReport) -> LoadRecord {
        let mut record = LoadRecord::default();

        for (column, idx) in &self.keys {
            let value = row
                .get(*idx)
                .map(|cell| decode_text(cell).trim().to_string())
                .filter(|cell| !is_missing(cell));
            if value.is_none() {
                *report.missing_keys.entry(column.name()).or_default() += 1;
            }
            record.set_key(*column, value);
        }

        for (measure, idx) in &self.measures {
            let value = row
                .get(*idx)
                .and_then(|cell| parse_decimal(&decode_text(cell)));
            if value.is_none() {
                *report.missing_values.entry(measure.name()).or_default() += 1;
            }
            record.set_value(*measure, value);
        }

        let record = record.derive();
        if record.granulos_por_tonelada.is_none() {
            *report
                .missing_values
                .entry(Measure::GranulosPorTonelada.name())
                .or_default() += 1;
        }
        record
    }
}

fn clean_header(raw: &[u8]) -> String {
    decode_text(raw)
        .trim_start_matches('\u{feff}')
        .trim()
        .to_string()
}

/// Loads the measurement file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, or if the header row is absent or
/// lacks a required column. Cells that do not parse are recorded as missing.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
    let file = File::open(path.as_ref())?;
    let dataset = read_records(file)?;

    info!(
        rows = dataset.report.rows_read,
        skipped = dataset.report.rows_skipped,
        "Measurement file loaded"
    );
    Ok(dataset)
}

/// Reads measurement records from any byte stream.
pub fn read_records<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(rdr.byte_headers()?)?;
    let mut dataset = Dataset::default();

    for (line, result) in rdr.byte_records().enumerate() {
        match result {
            Ok(row) => {
                let record = columns.decode(&row, &mut dataset.report);
                dataset.records.push(record);
                dataset.report.rows_read += 1;
            }
            Err(e) => {
                // 1-based, after the header
                warn!(line = line + 2, error = %e, "Skipping undecodable row");
                dataset.report.rows_skipped += 1;
            }
        }
    }

    debug!(
        missing_values = ?dataset.report.missing_values,
        missing_keys = ?dataset.report.missing_keys,
        "Per-column missing cells"
    );

    Ok(dataset)
}

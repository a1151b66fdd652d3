#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV loader for the court case dataset.
//!
//! The dataset is a comma-separated export with one row per case. It is
//! read once at startup into an immutable [`Dataset`] that request
//! handlers share without locking.

pub mod parsing;

use std::io::Read;
use std::path::Path;

use caseload_case_models::{CaseRecord, Dimension};

use crate::parsing::parse_case_date;

/// Column holding the court district.
pub const COL_DISTRICT: &str = "comarca";
/// Column holding the filing date.
pub const COL_FILING_DATE: &str = "data_distribuicao";
/// Column holding the closing date.
pub const COL_CLOSING_DATE: &str = "data_baixa";
/// Column holding the action area.
pub const COL_ACTION_AREA: &str = "nome_area_acao";
/// Column holding the subject.
pub const COL_SUBJECT: &str = Dimension::Subject.source_column();
/// Column holding the class.
pub const COL_CLASS: &str = Dimension::Class.source_column();

/// Errors that can occur while loading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a column the reports depend on.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Name of the absent column.
        column: &'static str,
    },
}

/// The full, read-only set of case records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<CaseRecord>,
}

impl Dataset {
    /// Wraps already-parsed records.
    #[must_use]
    pub const fn from_records(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    /// All records, in file order.
    #[must_use]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    district: usize,
    filing_date: usize,
    closing_date: usize,
    action_area: usize,
    subject: usize,
    class: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, SourceError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|h| *h == column)
                .ok_or(SourceError::MissingColumn { column })
        };

        Ok(Self {
            district: find(COL_DISTRICT)?,
            filing_date: find(COL_FILING_DATE)?,
            closing_date: find(COL_CLOSING_DATE)?,
            action_area: find(COL_ACTION_AREA)?,
            subject: find(COL_SUBJECT)?,
            class: find(COL_CLASS)?,
        })
    }
}

/// Loads the dataset from a CSV file on disk.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read, is not valid CSV,
/// or lacks a required column.
pub fn load(path: &Path) -> Result<Dataset, SourceError> {
    log::info!("Loading case dataset from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// Loads the dataset from any CSV byte stream.
///
/// Date cells that cannot be parsed become missing; the row itself is
/// always kept.
///
/// # Errors
///
/// Returns [`SourceError`] if the stream is not valid CSV or lacks a
/// required column.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut coerced_dates: u64 = 0;

    for result in reader.records() {
        let row = result?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let mut date_cell = |i: usize| {
            let raw = cell(i);
            let parsed = parse_case_date(raw);
            if parsed.is_none() && !raw.is_empty() {
                coerced_dates += 1;
            }
            parsed
        };

        let filing_date = date_cell(columns.filing_date);
        let closing_date = date_cell(columns.closing_date);

        records.push(CaseRecord {
            district: cell(columns.district).to_owned(),
            filing_date,
            closing_date,
            action_area: cell(columns.action_area).to_owned(),
            subject: cell(columns.subject).to_owned(),
            class: cell(columns.class).to_owned(),
        });
    }

    if coerced_dates > 0 {
        log::warn!("{coerced_dates} unparsable date cells treated as missing");
    }
    log::info!("Loaded {} case records", records.len());

    Ok(Dataset::from_records(records))
}

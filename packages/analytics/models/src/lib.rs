#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregated report types for the caseload dashboard.
//!
//! These are the outputs of `caseload_analytics`. They carry no rendering
//! concerns; the server and CLI map them onto their own presentation types.

use caseload_case_models::{Dimension, RowKey};
use serde::{Deserialize, Serialize};

/// Filed, closed and pending counts for one group, with its congestion rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// Which group this row describes.
    pub key: RowKey,
    /// Records filed in the selected year.
    pub filed_count: u64,
    /// Records closed in the selected year, regardless of filing year.
    pub closed_count: u64,
    /// Records filed in the selected year that are still open.
    pub pending_count: u64,
    /// `pending / (pending + closed) * 100`, two decimals.
    pub congestion_rate: f64,
}

/// Result of aggregating one district and year along one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// District the report was computed for.
    pub district: String,
    /// Year the report was computed for.
    pub year: i32,
    /// Secondary grouping dimension.
    pub dimension: Dimension,
    /// Group rows in key order, followed by the totals row.
    pub rows: Vec<AggregateRow>,
}

impl Report {
    /// The totals row, if present.
    #[must_use]
    pub fn totals(&self) -> Option<&AggregateRow> {
        self.rows.iter().find(|row| row.key.is_total())
    }

    /// All rows except the totals row.
    pub fn groups(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().filter(|row| !row.key.is_total())
    }
}

/// Values available for the dashboard's filter selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct districts, ascending.
    pub districts: Vec<String>,
    /// Distinct filing years, ascending.
    pub years: Vec<i32>,
}

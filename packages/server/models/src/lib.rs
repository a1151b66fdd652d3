#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the caseload server.
//!
//! These types are serialized to JSON for the dashboard. They are separate
//! from the analytics report types so the table and chart contracts can
//! evolve without touching the aggregation code.

use caseload_analytics_models::{AggregateRow, FilterOptions, Report};
use caseload_case_models::Dimension;
use serde::{Deserialize, Serialize};

/// Heading of the filed-count column.
pub const COL_FILED: &str = "Distribuídos";
/// Heading of the closed-count column.
pub const COL_CLOSED: &str = "Baixados";
/// Heading of the pending-count column.
pub const COL_PENDING: &str = "Pendentes";
/// Heading of the congestion-rate column, also the chart's y-axis title.
pub const COL_CONGESTION_RATE: &str = "Taxa de Congestionamento (%)";

/// Fixed y-axis range of congestion-rate charts.
pub const CHART_Y_RANGE: [f64; 2] = [0.0, 100.0];

/// Query parameters shared by every report endpoint.
///
/// The Portuguese names used by the original dashboard links (`comarca`,
/// `ano`) are accepted as aliases. Collecting from raw query pairs keeps
/// the first value of a repeated parameter; an alias and its canonical
/// name count as the same parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// Court district.
    #[serde(alias = "comarca")]
    pub district: Option<String>,
    /// Year as free text; anything that is not all digits falls back to
    /// the default.
    #[serde(alias = "ano")]
    pub year: Option<String>,
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ReportQueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "district" | "comarca" => &mut params.district,
                "year" | "ano" => &mut params.year,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// Filter values used when a request leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDefaults {
    /// Default district.
    pub district: String,
    /// Default year.
    pub year: i32,
}

/// District and year a report was actually computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSelectedFilters {
    /// Effective district.
    pub district: String,
    /// Effective year.
    pub year: i32,
}

impl ReportQueryParams {
    /// Applies defaults and year coercion.
    #[must_use]
    pub fn resolve(&self, defaults: &ReportDefaults) -> ApiSelectedFilters {
        ApiSelectedFilters {
            district: self
                .district
                .clone()
                .unwrap_or_else(|| defaults.district.clone()),
            year: coerce_year(self.year.as_deref(), defaults.year),
        }
    }
}

/// Parses a year, falling back to `default` for empty, non-digit or
/// out-of-range input.
#[must_use]
pub fn coerce_year(raw: Option<&str>, default: i32) -> i32 {
    match raw {
        Some(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().unwrap_or(default)
        }
        _ => default,
    }
}

/// One row of a report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTableRow {
    /// Subject or class (empty for the totals row).
    pub label: String,
    /// Action area (`"TOTAL"` for the totals row).
    pub action_area: String,
    /// Cases filed in the year.
    pub filed: u64,
    /// Cases closed in the year.
    pub closed: u64,
    /// Cases filed in the year and still open.
    pub pending: u64,
    /// Congestion rate in percent.
    pub congestion_rate: f64,
    /// Whether this is the synthetic totals row.
    pub is_total: bool,
}

impl From<&AggregateRow> for ApiTableRow {
    fn from(row: &AggregateRow) -> Self {
        Self {
            label: row.key.value().to_string(),
            action_area: row.key.action_area().to_string(),
            filed: row.filed_count,
            closed: row.closed_count,
            pending: row.pending_count,
            congestion_rate: row.congestion_rate,
            is_total: row.key.is_total(),
        }
    }
}

/// A labelled report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTable {
    /// Grouping dimension.
    pub dimension: Dimension,
    /// Column headings, in row field order.
    pub columns: Vec<String>,
    /// Group rows followed by the totals row.
    pub rows: Vec<ApiTableRow>,
}

impl From<&Report> for ApiTable {
    fn from(report: &Report) -> Self {
        Self {
            dimension: report.dimension,
            columns: [
                report.dimension.label(),
                COL_FILED,
                COL_CLOSED,
                COL_PENDING,
                COL_CONGESTION_RATE,
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            rows: report.rows.iter().map(ApiTableRow::from).collect(),
        }
    }
}

/// A single bar of a congestion-rate chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChartBar {
    /// X-axis category (subject or class).
    pub label: String,
    /// Action area, used to colour bars.
    pub action_area: String,
    /// Congestion rate in percent.
    pub value: f64,
}

/// A bar chart of congestion rate per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChart {
    /// Grouping dimension.
    pub dimension: Dimension,
    /// X-axis title.
    pub x_axis_title: String,
    /// Y-axis title.
    pub y_axis_title: String,
    /// Y-axis range, always `[0, 100]`.
    pub y_axis_range: [f64; 2],
    /// Legend title.
    pub legend_title: String,
    /// One bar per group; the totals row is not plotted.
    pub bars: Vec<ApiChartBar>,
}

impl From<&Report> for ApiChart {
    fn from(report: &Report) -> Self {
        let label = report.dimension.label();
        Self {
            dimension: report.dimension,
            x_axis_title: label.to_string(),
            y_axis_title: COL_CONGESTION_RATE.to_string(),
            y_axis_range: CHART_Y_RANGE,
            legend_title: label.to_string(),
            bars: report
                .groups()
                .map(|row| ApiChartBar {
                    label: row.key.value().to_string(),
                    action_area: row.key.action_area().to_string(),
                    value: row.congestion_rate,
                })
                .collect(),
        }
    }
}

/// Response of the table endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTableResponse {
    /// The report table.
    pub table: ApiTable,
    /// Values for the filter selectors.
    pub filters: FilterOptions,
    /// Filters the table was computed with.
    pub selected: ApiSelectedFilters,
}

/// Response of the chart endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChartResponse {
    /// The chart definition.
    pub chart: ApiChart,
    /// Values for the filter selectors.
    pub filters: FilterOptions,
    /// Filters the chart was computed with.
    pub selected: ApiSelectedFilters,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of case records loaded.
    pub records: u64,
}

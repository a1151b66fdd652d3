//! Filed/closed/pending aggregation and the congestion rate.
//!
//! The two counting windows differ: `filed` and `pending` look at cases
//! *filed* in the selected year, while `closed` looks at every case of the
//! district *closed* in that year, whatever its filing year. Closure
//! counts are left-joined onto the filing-side groups, so a group with
//! closures but no filings in the year is dropped.

use std::collections::BTreeMap;

use caseload_analytics_models::{AggregateRow, Report};
use caseload_case_models::{CaseRecord, Dimension, RowKey};
use caseload_source::Dataset;

#[derive(Debug, Default, Clone, Copy)]
struct GroupCounts {
    filed: u64,
    closed: u64,
    pending: u64,
}

/// Computes `pending / (pending + closed) * 100`, rounded to two decimals.
///
/// Returns `0.0` when both counts are zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn congestion_rate(pending: u64, closed: u64) -> f64 {
    let denominator = pending + closed;
    if denominator == 0 {
        return 0.0;
    }
    round2(pending as f64 / denominator as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `(action area, dimension value)`, or `None` when either cell is blank.
fn group_key(record: &CaseRecord, dimension: Dimension) -> Option<(&str, &str)> {
    let value = record.dimension_value(dimension);
    if record.action_area.is_empty() || value.is_empty() {
        return None;
    }
    Some((record.action_area.as_str(), value))
}

/// Aggregates one district and year along `dimension`.
///
/// Group rows come out in ascending `(action area, value)` order and the
/// totals row is always last. An unknown district or a year with no
/// filings yields only the all-zero totals row. Records with a blank
/// district never match, so an empty `district` yields the same.
#[must_use]
pub fn aggregate(dataset: &Dataset, district: &str, year: i32, dimension: Dimension) -> Report {
    let in_district: Vec<&CaseRecord> = dataset
        .records()
        .iter()
        .filter(|r| !r.district.is_empty() && r.district == district)
        .collect();

    let mut groups: BTreeMap<(&str, &str), GroupCounts> = BTreeMap::new();

    for record in in_district
        .iter()
        .filter(|r| r.filing_year() == Some(year))
    {
        let Some(key) = group_key(record, dimension) else {
            continue;
        };
        let counts = groups.entry(key).or_default();
        counts.filed += 1;
        if record.is_pending() {
            counts.pending += 1;
        }
    }

    for record in in_district
        .iter()
        .filter(|r| r.closing_year() == Some(year))
    {
        if let Some(key) = group_key(record, dimension)
            && let Some(counts) = groups.get_mut(&key)
        {
            counts.closed += 1;
        }
    }

    log::debug!(
        "Aggregated {} records of {district}/{year} into {} {dimension} groups",
        in_district.len(),
        groups.len()
    );

    let mut totals = GroupCounts::default();
    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|((action_area, value), counts)| {
            totals.filed += counts.filed;
            totals.closed += counts.closed;
            totals.pending += counts.pending;
            to_row(
                RowKey::Group {
                    action_area: action_area.to_owned(),
                    value: value.to_owned(),
                },
                counts,
            )
        })
        .collect();
    rows.push(to_row(RowKey::Total, totals));

    Report {
        district: district.to_owned(),
        year,
        dimension,
        rows,
    }
}

fn to_row(key: RowKey, counts: GroupCounts) -> AggregateRow {
    AggregateRow {
        key,
        filed_count: counts.filed,
        closed_count: counts.closed,
        pending_count: counts.pending,
        congestion_rate: congestion_rate(counts.pending, counts.closed),
    }
}

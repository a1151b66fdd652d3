//! Distinct filter values present in the dataset.

use std::collections::BTreeSet;

use caseload_analytics_models::FilterOptions;
use caseload_source::Dataset;

/// All distinct, non-blank districts in ascending order.
#[must_use]
pub fn distinct_districts(dataset: &Dataset) -> Vec<String> {
    dataset
        .records()
        .iter()
        .map(|r| r.district.as_str())
        .filter(|d| !d.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// All distinct filing years in ascending order.
///
/// Records without a filing date contribute nothing.
#[must_use]
pub fn distinct_years(dataset: &Dataset) -> Vec<i32> {
    dataset
        .records()
        .iter()
        .filter_map(caseload_case_models::CaseRecord::filing_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Both selector lists at once.
#[must_use]
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        districts: distinct_districts(dataset),
        years: distinct_years(dataset),
    }
}

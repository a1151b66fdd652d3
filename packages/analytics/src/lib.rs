#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Congestion-rate aggregation over the case dataset.
//!
//! [`lookup`] lists the districts and years a user can filter by, and
//! [`congestion`] computes the per-group filed/closed/pending report that
//! every dashboard view is built from. All functions are pure reads of a
//! shared [`caseload_source::Dataset`].

pub mod congestion;
pub mod lookup;

pub use congestion::{aggregate, congestion_rate};
pub use lookup::{distinct_districts, distinct_years, filter_options};

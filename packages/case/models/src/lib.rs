#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Case record and grouping dimension types.
//!
//! A [`CaseRecord`] is one row of the court dataset ("processo"). Reports
//! group records by action area plus a secondary [`Dimension`], and every
//! output row is identified by a [`RowKey`].

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Serialized action area of the synthetic totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// A single case record loaded from the source dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Court district (`comarca`).
    pub district: String,
    /// Filing date (`data_distribuicao`). `None` when absent or unparsable.
    pub filing_date: Option<NaiveDate>,
    /// Closing date (`data_baixa`). `None` while the case is open.
    pub closing_date: Option<NaiveDate>,
    /// Broad category of legal action (`nome_area_acao`).
    pub action_area: String,
    /// Fine-grained subject classification (`nome_assunto`).
    pub subject: String,
    /// Case class (`natureza`), orthogonal to the subject.
    pub class: String,
}

impl CaseRecord {
    /// Year of the filing date, if known.
    #[must_use]
    pub fn filing_year(&self) -> Option<i32> {
        self.filing_date.map(|d| d.year())
    }

    /// Year of the closing date, if the case is closed.
    #[must_use]
    pub fn closing_year(&self) -> Option<i32> {
        self.closing_date.map(|d| d.year())
    }

    /// Whether the case has no closing date.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.closing_date.is_none()
    }

    /// Returns the value of the given grouping dimension.
    #[must_use]
    pub fn dimension_value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Subject => &self.subject,
            Dimension::Class => &self.class,
        }
    }
}

/// Secondary grouping key for a report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Dimension {
    /// Group by `nome_assunto`.
    Subject,
    /// Group by `natureza`.
    Class,
}

impl Dimension {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Subject, Self::Class]
    }

    /// Column heading shown to dashboard users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Subject => "Assunto",
            Self::Class => "Classe",
        }
    }

    /// Name of the source column this dimension reads.
    #[must_use]
    pub const fn source_column(self) -> &'static str {
        match self {
            Self::Subject => "nome_assunto",
            Self::Class => "natureza",
        }
    }
}

/// Identifies a row of an aggregated report.
///
/// The totals row is a distinct variant so it can never be confused with a
/// real action area that happens to be called "TOTAL".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowKey {
    /// A real `(action area, dimension value)` group.
    Group {
        /// Action area of the group.
        action_area: String,
        /// Subject or class of the group.
        value: String,
    },
    /// The synthetic totals row.
    Total,
}

impl RowKey {
    /// Action area as displayed (`"TOTAL"` for the totals row).
    #[must_use]
    pub fn action_area(&self) -> &str {
        match self {
            Self::Group { action_area, .. } => action_area,
            Self::Total => TOTAL_LABEL,
        }
    }

    /// Dimension value as displayed (empty for the totals row).
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Group { value, .. } => value,
            Self::Total => "",
        }
    }

    /// Whether this is the totals row.
    #[must_use]
    pub const fn is_total(&self) -> bool {
        matches!(self, Self::Total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, class: &str) -> CaseRecord {
        CaseRecord {
            district: "GOIANIRA".to_string(),
            filing_date: NaiveDate::from_ymd_opt(2020, 3, 9),
            closing_date: None,
            action_area: "Cível".to_string(),
            subject: subject.to_string(),
            class: class.to_string(),
        }
    }

    #[test]
    fn dimension_round_trips_through_strings() {
        for dimension in Dimension::all() {
            let parsed: Dimension = dimension.to_string().parse().unwrap();
            assert_eq!(parsed, *dimension);
        }
        assert_eq!("CLASS".parse::<Dimension>().unwrap(), Dimension::Class);
    }

    #[test]
    fn dimension_names_source_column() {
        assert_eq!(Dimension::Subject.source_column(), "nome_assunto");
        assert_eq!(Dimension::Class.source_column(), "natureza");
    }

    #[test]
    fn dimension_value_selects_field() {
        let r = record("Dano Moral", "Procedimento Comum");
        assert_eq!(r.dimension_value(Dimension::Subject), "Dano Moral");
        assert_eq!(r.dimension_value(Dimension::Class), "Procedimento Comum");
    }

    #[test]
    fn open_case_is_pending() {
        let mut r = record("a", "b");
        assert!(r.is_pending());
        assert_eq!(r.filing_year(), Some(2020));
        assert_eq!(r.closing_year(), None);

        r.closing_date = NaiveDate::from_ymd_opt(2021, 1, 2);
        assert!(!r.is_pending());
        assert_eq!(r.closing_year(), Some(2021));
    }

    #[test]
    fn total_key_uses_sentinel_labels() {
        assert_eq!(RowKey::Total.action_area(), TOTAL_LABEL);
        assert_eq!(RowKey::Total.value(), "");
        assert!(RowKey::Total.is_total());

        let group = RowKey::Group {
            action_area: TOTAL_LABEL.to_string(),
            value: String::new(),
        };
        assert!(!group.is_total());
    }

    #[test]
    fn group_keys_sort_before_total() {
        let group = RowKey::Group {
            action_area: "Z".to_string(),
            value: "z".to_string(),
        };
        assert!(group < RowKey::Total);
    }
}

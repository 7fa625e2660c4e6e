//! TermRecord: one office-holder and the years they held office.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An office-holder's term at year granularity.
///
/// Both years are inclusive. Records are built by the term extractor, which
/// guarantees `end_year >= start_year` and a bounded span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl TermRecord {
    pub fn new(name: impl Into<String>, start_year: i32, end_year: i32) -> Self {
        Self {
            name: name.into(),
            start_year,
            end_year,
        }
    }

    /// Length of the term in whole years.
    pub fn span_years(&self) -> i32 {
        self.end_year - self.start_year
    }

    /// Jan 1 of the start year.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, 1, 1)
    }

    /// Dec 31 of the end year.
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.end_year, 12, 31)
    }

    /// True if the term ended no earlier than `years` before `current_year`.
    pub fn is_recent(&self, current_year: i32, years: i32) -> bool {
        self.end_year >= current_year - years
    }
}

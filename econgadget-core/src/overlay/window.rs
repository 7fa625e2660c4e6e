//! Display window: the date range a chart shows.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range a chart is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DisplayWindow {
    /// Returns `None` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The `years` years ending on `today`: same month and day, `years`
    /// earlier (Feb 29 falls back to Feb 28).
    pub fn trailing_years(today: NaiveDate, years: u32) -> Self {
        let start = Months::new(years.saturating_mul(12));
        let start = today.checked_sub_months(start).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Intersection of `[start, end]` with the window, if any.
    pub fn clamp(&self, start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if end < self.start || start > self.end || start > end {
            return None;
        }
        Some((start.max(self.start), end.min(self.end)))
    }

    /// Calendar years covered, as used in chart titles.
    pub fn span_years(&self) -> u32 {
        (self.end.year() - self.start.year()).max(0) as u32
    }

    /// Number of days in the window, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

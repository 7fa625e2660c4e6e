//! Observation: one monthly value of one statistical series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single monthly data point after normalization.
///
/// `date` is always the first of the month. The rolling averages are filled in
/// by the normalizer and are `None` until enough prior points of the same
/// series exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    pub series_id: String,
    pub avg_6: Option<f64>,
    pub avg_12: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64, series_id: impl Into<String>) -> Self {
        Self {
            date,
            value,
            series_id: series_id.into(),
            avg_6: None,
            avg_12: None,
        }
    }
}

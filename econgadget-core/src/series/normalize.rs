//! Series normalization: nested API payload → sorted monthly observations.
//!
//! Only monthly period codes (`M01`..`M12`) survive. Quarterly, semi-annual and
//! annual-average codes (`Q01`, `S01`, `M13`) are dropped, as is any point
//! whose year or value does not parse. Rolling means are computed per series
//! after sorting, so a window never reaches into a neighbouring series.

use super::payload::{parse_payload, ApiDataPoint, ApiResponse};
use super::rolling::{rolling_mean, LONG_WINDOW, SHORT_WINDOW};
use crate::data::provider::DataError;
use crate::domain::Observation;
use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

/// Why a data point was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointSkip {
    #[error("malformed data point: {0}")]
    Malformed(String),

    #[error("period '{0}' is not monthly")]
    NonMonthlyPeriod(String),

    #[error("unparsable year '{0}'")]
    InvalidYear(String),

    #[error("unparsable value '{0}'")]
    InvalidValue(String),

    #[error("duplicate point for {date}")]
    Duplicate { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPoint {
    pub series_id: String,
    /// Position of the point in the series' `data` array.
    pub index: usize,
    pub reason: PointSkip,
}

/// Normalized observations for every series in a payload.
///
/// `observations` is ordered by date; points of different series on the same
/// date keep the payload's series order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub observations: Vec<Observation>,
    pub skipped: Vec<SkippedPoint>,
}

impl Normalized {
    /// Distinct series ids, in the order the payload listed them.
    pub fn series_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.observations
            .iter()
            .map(|o| o.series_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Observations of one series, oldest first.
    pub fn for_series<'a>(&'a self, series_id: &'a str) -> impl Iterator<Item = &'a Observation> {
        self.observations
            .iter()
            .filter(move |o| o.series_id == series_id)
    }
}

/// Month number for a monthly period code: `M01` → 1 .. `M12` → 12.
pub fn parse_month(period: &str) -> Option<u32> {
    let digits = period.strip_prefix('M')?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u32 = digits.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

/// Convert one raw point, or say why it was dropped.
pub fn parse_point(series_id: &str, raw: &serde_json::Value) -> Result<Observation, PointSkip> {
    let point: ApiDataPoint =
        serde_json::from_value(raw.clone()).map_err(|e| PointSkip::Malformed(e.to_string()))?;

    let month =
        parse_month(&point.period).ok_or_else(|| PointSkip::NonMonthlyPeriod(point.period.clone()))?;

    let year_text = point.year.as_text();
    let year: i32 = year_text
        .parse()
        .map_err(|_| PointSkip::InvalidYear(year_text.to_string()))?;
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PointSkip::InvalidYear(year_text.to_string()))?;

    let value_text = point.value.as_text();
    let value: f64 = value_text
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| PointSkip::InvalidValue(value_text.to_string()))?;

    Ok(Observation::new(date, value, series_id))
}

/// Normalize an already-parsed payload.
pub fn normalize(resp: &ApiResponse) -> Normalized {
    let mut out = Normalized::default();
    let Some(results) = &resp.results else {
        return out;
    };

    let mut series_blocks: Vec<Vec<Observation>> = Vec::new();
    for series in &results.series {
        let mut obs = Vec::with_capacity(series.data.len());
        let mut seen = HashSet::new();

        for (index, raw) in series.data.iter().enumerate() {
            let skip = |reason| SkippedPoint {
                series_id: series.series_id.clone(),
                index,
                reason,
            };
            match parse_point(&series.series_id, raw) {
                Ok(o) if !seen.insert(o.date) => {
                    out.skipped.push(skip(PointSkip::Duplicate { date: o.date }));
                }
                Ok(o) => obs.push(o),
                Err(reason) => out.skipped.push(skip(reason)),
            }
        }

        // The API lists newest first; the windows need oldest first.
        obs.sort_by_key(|o| o.date);
        annotate_rolling(&mut obs);
        series_blocks.push(obs);
    }

    // Stable sort keeps the payload's series order on equal dates.
    out.observations = series_blocks.into_iter().flatten().collect();
    out.observations.sort_by_key(|o| o.date);

    if !out.skipped.is_empty() {
        log::debug!("normalizer dropped {} data points", out.skipped.len());
    }
    out
}

/// Parse a raw body and normalize it.
pub fn normalize_body(body: &str) -> Result<Normalized, DataError> {
    Ok(normalize(&parse_payload(body)?))
}

/// Fill `avg_6`/`avg_12` over one series that is already sorted by date.
fn annotate_rolling(obs: &mut [Observation]) {
    let values: Vec<f64> = obs.iter().map(|o| o.value).collect();
    let short = rolling_mean(&values, SHORT_WINDOW);
    let long = rolling_mean(&values, LONG_WINDOW);
    for ((o, s), l) in obs.iter_mut().zip(short).zip(long) {
        o.avg_6 = s;
        o.avg_12 = l;
    }
}

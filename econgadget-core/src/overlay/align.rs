//! Alignment of term records with a normalized series.
//!
//! Produces everything a chart renderer needs (window-filtered observations,
//! line definitions, clamped overlay intervals, a legend and per-series
//! summaries) without drawing anything.

use super::legend::{Legend, LineStyle, MarkStyle};
use super::palette::{color_for, BLUE, GREEN, ORANGE};
use super::window::DisplayWindow;
use crate::domain::{Dataset, Observation, TermRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opacity of term shading.
pub const OVERLAY_ALPHA: f32 = 0.2;

/// Which field of an observation a line plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueField {
    Value,
    Avg6,
    Avg12,
}

impl ValueField {
    pub fn get(&self, obs: &Observation) -> Option<f64> {
        match self {
            ValueField::Value => Some(obs.value),
            ValueField::Avg6 => obs.avg_6,
            ValueField::Avg12 => obs.avg_12,
        }
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLine {
    pub series_id: String,
    pub label: String,
    pub field: ValueField,
    pub style: MarkStyle,
}

impl SeriesLine {
    /// Defined points of this line, in date order.
    pub fn points(&self, observations: &[Observation]) -> Vec<(NaiveDate, f64)> {
        observations
            .iter()
            .filter(|o| o.series_id == self.series_id)
            .filter_map(|o| self.field.get(o).map(|v| (o.date, v)))
            .collect()
    }
}

/// A shaded date range for one term, already clamped to the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayInterval {
    pub term: TermRecord,
    pub color: super::palette::Rgb,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Per-series summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub series_id: String,
    pub label: String,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub count: usize,
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub latest_avg_6: Option<f64>,
    pub latest_avg_12: Option<f64>,
}

/// Everything the renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub y_label: String,
    pub window: DisplayWindow,
    pub observations: Vec<Observation>,
    pub lines: Vec<SeriesLine>,
    pub overlays: Vec<OverlayInterval>,
    pub legend: Legend,
    pub summaries: Vec<SeriesSummary>,
}

impl ChartData {
    /// Min and max over every defined point of every line.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.lines
            .iter()
            .flat_map(|l| l.points(&self.observations))
            .map(|(_, v)| v)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Observations dated inside the window. Rolling fields are kept as computed
/// over the full series.
pub fn filter_window(observations: &[Observation], window: &DisplayWindow) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| window.contains(o.date))
        .cloned()
        .collect()
}

/// One interval per term overlapping the window, clamped to it.
///
/// Colors are taken from the palette by the term's position in `terms`, so a
/// term keeps its color whether or not earlier terms fall outside the window.
pub fn overlay_intervals(terms: &[TermRecord], window: &DisplayWindow) -> Vec<OverlayInterval> {
    terms
        .iter()
        .enumerate()
        .filter_map(|(i, term)| {
            let (start, end) = window.clamp(term.start_date()?, term.end_date()?)?;
            Some(OverlayInterval {
                term: term.clone(),
                color: color_for(i),
                start,
                end,
            })
        })
        .collect()
}

/// Series ids in first-seen order.
fn series_order(observations: &[Observation], dataset: Dataset) -> Vec<String> {
    let mut ids: Vec<String> = dataset
        .series_ids()
        .into_iter()
        .filter(|id| observations.iter().any(|o| &o.series_id == id))
        .collect();
    for o in observations {
        if !ids.contains(&o.series_id) {
            ids.push(o.series_id.clone());
        }
    }
    ids
}

/// Line specs for a dataset.
///
/// Unemployment plots the actual value with its 6- and 12-period means.
/// CPI plots one actual-value line per series, labelled by series.
fn series_lines(dataset: Dataset, ids: &[String]) -> Vec<SeriesLine> {
    match dataset {
        Dataset::Unemployment => ids
            .iter()
            .flat_map(|id| {
                [
                    ("Actual", ValueField::Value, ORANGE, LineStyle::Dashed),
                    ("6-Mo Avg", ValueField::Avg6, GREEN, LineStyle::Solid),
                    ("12-Mo Avg", ValueField::Avg12, BLUE, LineStyle::Solid),
                ]
                .map(|(label, field, color, dash)| SeriesLine {
                    series_id: id.clone(),
                    label: label.to_string(),
                    field,
                    style: MarkStyle::Line { color, dash },
                })
            })
            .collect(),
        Dataset::Cpi => ids
            .iter()
            .enumerate()
            .map(|(i, id)| SeriesLine {
                series_id: id.clone(),
                label: format!("{} (Actual)", dataset.label_for(id)),
                field: ValueField::Value,
                style: MarkStyle::Line {
                    color: color_for(i),
                    dash: LineStyle::Solid,
                },
            })
            .collect(),
    }
}

fn summarize(dataset: Dataset, id: &str, observations: &[Observation]) -> Option<SeriesSummary> {
    let rows: Vec<&Observation> = observations.iter().filter(|o| o.series_id == id).collect();
    let first = rows.first()?;
    let last = rows.last()?;
    let (min, max) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
        (lo.min(o.value), hi.max(o.value))
    });
    Some(SeriesSummary {
        series_id: id.to_string(),
        label: dataset.label_for(id).to_string(),
        first: first.date,
        last: last.date,
        count: rows.len(),
        latest: last.value,
        min,
        max,
        latest_avg_6: last.avg_6,
        latest_avg_12: last.avg_12,
    })
}

/// Join a normalized series with term records for display.
///
/// `observations` must be sorted by date (the normalizer guarantees it).
/// Terms are expected in recency-filtered order; each keeps its palette slot.
pub fn align(
    dataset: Dataset,
    observations: &[Observation],
    terms: &[TermRecord],
    window: &DisplayWindow,
) -> ChartData {
    let visible = filter_window(observations, window);
    let ids = series_order(&visible, dataset);
    let lines = series_lines(dataset, &ids);
    let overlays = overlay_intervals(terms, window);

    let mut legend = Legend::new();
    for line in &lines {
        legend.push(line.label.clone(), line.style);
    }
    for overlay in &overlays {
        legend.push(
            overlay.term.name.clone(),
            MarkStyle::Shade {
                color: overlay.color,
                alpha: OVERLAY_ALPHA,
            },
        );
    }

    let summaries = ids
        .iter()
        .filter_map(|id| summarize(dataset, id, &visible))
        .collect();

    ChartData {
        title: dataset.title(window.span_years()),
        y_label: dataset.y_label().to_string(),
        window: *window,
        observations: visible,
        lines,
        overlays,
        legend,
        summaries,
    }
}

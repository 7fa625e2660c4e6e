//! CSV export of a chart's observations.
//!
//! Columns: date, series_id, label, value, avg_6, avg_12. Undefined averages
//! are written as empty fields.

use crate::overlay::ChartData;
use crate::domain::Dataset;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub const CSV_HEADER: [&str; 6] = ["date", "series_id", "label", "value", "avg_6", "avg_12"];

fn opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.4}")).unwrap_or_default()
}

/// Render the chart's window-filtered observations as CSV.
pub fn observations_csv(dataset: Dataset, chart: &ChartData) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for o in &chart.observations {
        let date = o.date.to_string();
        let value = format!("{:.4}", o.value);
        let (avg_6, avg_12) = (opt(o.avg_6), opt(o.avg_12));
        wtr.write_record([
            date.as_str(),
            o.series_id.as_str(),
            dataset.label_for(&o.series_id),
            value.as_str(),
            avg_6.as_str(),
            avg_12.as_str(),
        ])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    // Every field written above is valid UTF-8.
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Write the CSV to `path`, returning the number of data rows.
pub fn write_csv(dataset: Dataset, chart: &ChartData, path: &Path) -> Result<usize, ExportError> {
    let body = observations_csv(dataset, chart)?;
    std::fs::write(path, body).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(chart.observations.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use crate::overlay::{align, DisplayWindow};
    use chrono::NaiveDate;

    #[test]
    fn writes_header_and_rows() {
        let d = |m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
        let mut a = Observation::new(d(1), 3.4, "LNU04000000");
        a.avg_6 = Some(3.5);
        let b = Observation::new(d(2), 3.6, "LNU04000000");
        let window = DisplayWindow::new(d(1), d(12)).unwrap();
        let chart = align(Dataset::Unemployment, &[a, b], &[], &window);

        let csv = observations_csv(Dataset::Unemployment, &chart).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,series_id,label,value,avg_6,avg_12");
        assert_eq!(
            lines[1],
            "2023-01-01,LNU04000000,Unemployment Rate,3.4000,3.5000,"
        );
        assert_eq!(lines[2], "2023-02-01,LNU04000000,Unemployment Rate,3.6000,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn quotes_labels_with_commas() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let o = Observation::new(d, 300.0, "CUUR0000SAF113");
        let window = DisplayWindow::new(d, d).unwrap();
        let chart = align(Dataset::Cpi, &[o], &[], &window);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpi.csv");
        assert_eq!(write_csv(Dataset::Cpi, &chart, &path).unwrap(), 1);
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("\"Meats, Poultry, Fish & Eggs\""));
    }
}

//! Built-in datasets: which series to request and how to label them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unemployment rate, 16 years and over, not seasonally adjusted.
pub const UNEMPLOYMENT_SERIES_ID: &str = "LNU04000000";

/// CPI-U components, not seasonally adjusted, with display labels.
pub const CPI_SERIES: &[(&str, &str)] = &[
    ("CUUR0000SA0", "All Items"),
    ("CUUR0000SAF11", "Food"),
    ("CUUR0000SAF111", "Food at Home"),
    ("CUUR0000SAF112", "Cereals & Bakery"),
    ("CUUR0000SAF113", "Meats, Poultry, Fish & Eggs"),
    ("CUUR0000SEFJ", "Dairy"),
    ("CUUR0000SEFV", "Food Away from Home"),
];

/// A named group of series that is fetched, cached and charted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Unemployment,
    Cpi,
}

impl Dataset {
    /// Series ids requested from the statistics API, in display order.
    pub fn series_ids(&self) -> Vec<String> {
        match self {
            Dataset::Unemployment => vec![UNEMPLOYMENT_SERIES_ID.to_string()],
            Dataset::Cpi => CPI_SERIES.iter().map(|(id, _)| id.to_string()).collect(),
        }
    }

    /// Display label for a series id; unknown ids label themselves.
    pub fn label_for<'a>(&self, series_id: &'a str) -> &'a str {
        match self {
            Dataset::Unemployment if series_id == UNEMPLOYMENT_SERIES_ID => "Unemployment Rate",
            Dataset::Cpi => CPI_SERIES
                .iter()
                .find(|(id, _)| *id == series_id)
                .map(|(_, label)| *label)
                .unwrap_or(series_id),
            _ => series_id,
        }
    }

    pub fn title(&self, years: u32) -> String {
        match self {
            Dataset::Unemployment => {
                format!("Unemployment Rate & Presidential Terms (Last {years} Years)")
            }
            Dataset::Cpi => format!("CPI Series & Presidential Terms (Last {years} Years)"),
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Dataset::Unemployment => "Unemployment Rate (%)",
            Dataset::Cpi => "Index Value",
        }
    }

    /// Label used in the interactive menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            Dataset::Unemployment => "Plot Unemployment Trends",
            Dataset::Cpi => "Plot CPI Trends",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Unemployment => write!(f, "unemployment"),
            Dataset::Cpi => write!(f, "cpi"),
        }
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unemployment" | "unemp" => Ok(Dataset::Unemployment),
            "cpi" => Ok(Dataset::Cpi),
            other => Err(format!("unknown dataset '{other}'. Valid: unemployment, cpi")),
        }
    }
}

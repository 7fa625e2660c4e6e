//! Econgadget Core: labor-statistics series charted against office-holder terms.
//!
//! - Term extraction from encyclopedia table markup
//! - Statistics API client and a read-through payload cache
//! - Series normalization with 6- and 12-period rolling means
//! - Overlay alignment (windowing, clamped term shading, legend, summaries)
//! - Configuration, CSV export, and the pipeline that sequences it all

pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod overlay;
pub mod pipeline;
pub mod series;
pub mod terms;

pub use config::{AppConfig, ConfigError};
pub use data::DataError;
pub use domain::{Dataset, Observation, TermRecord};
pub use pipeline::{ChartOutcome, LiveServices, LoadedDataset, Pipeline};

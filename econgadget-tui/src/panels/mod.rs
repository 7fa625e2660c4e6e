//! TUI panels for the different screens
//!
//! - Menu: top-level actions
//! - Chart: series lines over shaded term overlays, with legend
//! - Summary: per-series summary table under the chart
//! - Terms: recent office-holders

pub mod chart;
pub mod menu;
pub mod summary;
pub mod terms;

pub use chart::ChartPanel;
pub use menu::MenuPanel;
pub use summary::SummaryPanel;
pub use terms::TermsPanel;

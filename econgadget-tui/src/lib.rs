//! Econgadget TUI - menu-driven terminal charts
//!
//! Provides:
//! - A four-item menu (CPI chart, unemployment chart, recent terms, exit)
//! - Series charts with term intervals shaded behind the lines
//! - Per-series summary table and a recent-terms table

pub mod app;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;

pub use app::{Action, AppState};
pub use theme::Theme;

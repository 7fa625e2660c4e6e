//! Overlay alignment: windowing, term shading, legend and palette.

pub mod align;
pub mod legend;
pub mod palette;
pub mod window;

pub use align::{
    align, filter_window, overlay_intervals, ChartData, OverlayInterval, SeriesLine, SeriesSummary,
    ValueField, OVERLAY_ALPHA,
};
pub use legend::{Legend, LegendEntry, LineStyle, MarkStyle};
pub use palette::{color_for, Rgb, TABLEAU_10};
pub use window::DisplayWindow;

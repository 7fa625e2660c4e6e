//! Chart panel - series lines over shaded term intervals
//!
//! Displays:
//! - One line per `SeriesLine` (dashed styles drawn as dots)
//! - Term overlays as shaded background columns
//! - A legend column on the right, first label wins

use chrono::NaiveDate;
use econgadget_core::overlay::{ChartData, LineStyle, MarkStyle, OVERLAY_ALPHA};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::theme::Theme;

/// Width reserved for the legend column.
const LEGEND_WIDTH: u16 = 30;

/// Chart panel widget
pub struct ChartPanel<'a> {
    chart: &'a ChartData,
    theme: &'a Theme,
}

impl<'a> ChartPanel<'a> {
    pub fn new(chart: &'a ChartData, theme: &'a Theme) -> Self {
        Self { chart, theme }
    }

    fn x_of(&self, date: NaiveDate) -> f64 {
        (date - self.chart.window.start).num_days() as f64
    }

    fn x_max(&self) -> f64 {
        (self.chart.window.days() - 1).max(1) as f64
    }

    fn y_range(&self) -> (f64, f64) {
        match self.chart.y_bounds() {
            Some((lo, hi)) if hi - lo > 1e-9 => {
                let pad = (hi - lo) * 0.05;
                (lo - pad, hi + pad)
            }
            Some((lo, hi)) => (lo - 1.0, hi + 1.0),
            None => (0.0, 1.0),
        }
    }

    fn x_labels(&self) -> Vec<String> {
        let w = &self.chart.window;
        let mid = w.start + chrono::Duration::days((w.days() - 1) / 2);
        vec![
            w.start.format("%Y-%m").to_string(),
            mid.format("%Y-%m").to_string(),
            w.end.format("%Y-%m").to_string(),
        ]
    }

    fn y_labels(&self, lo: f64, hi: f64) -> Vec<String> {
        vec![
            format!("{lo:.1}"),
            format!("{:.1}", (lo + hi) / 2.0),
            format!("{hi:.1}"),
        ]
    }

    /// Paint each overlay's columns inside `plot`, blending with whatever
    /// shade is already there.
    fn paint_overlays(&self, plot: Rect, buf: &mut Buffer) {
        if plot.width == 0 || plot.height == 0 {
            return;
        }
        let span = self.x_max();
        let col_of = |x: f64| -> u16 {
            let frac = (x / span).clamp(0.0, 1.0);
            plot.x + (frac * (plot.width - 1) as f64).round() as u16
        };

        for overlay in &self.chart.overlays {
            let left = col_of(self.x_of(overlay.start));
            let right = col_of(self.x_of(overlay.end));
            for x in left..=right {
                for y in plot.top()..plot.bottom() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        let bg = self.theme.shade(overlay.color, OVERLAY_ALPHA, cell.bg);
                        cell.set_bg(bg);
                    }
                }
            }
        }
    }

    fn legend_lines(&self) -> Vec<Line<'a>> {
        self.chart
            .legend
            .entries()
            .iter()
            .map(|entry| {
                let swatch = match entry.style {
                    MarkStyle::Line {
                        color,
                        dash: LineStyle::Solid,
                    } => Span::styled("━━ ", Style::default().fg(self.theme.series_color(color))),
                    MarkStyle::Line {
                        color,
                        dash: LineStyle::Dashed,
                    } => Span::styled("┄┄ ", Style::default().fg(self.theme.series_color(color))),
                    MarkStyle::Shade { color, alpha } => Span::styled(
                        "██ ",
                        Style::default().fg(self.theme.shade(color, alpha, self.theme.background)),
                    ),
                };
                Line::from(vec![
                    swatch,
                    Span::styled(
                        entry.label.clone(),
                        Style::default().fg(self.theme.text_primary),
                    ),
                ])
            })
            .collect()
    }
}

/// Where the chart widget puts its graph inside `inner`, given the widest
/// y label and the first x label. Mirrors the chart's own layout rules for
/// left-aligned x labels with both axes labelled.
pub fn plot_area(inner: Rect, y_label_width: u16, first_x_label_width: u16) -> Rect {
    let left_labels = y_label_width
        .max(first_x_label_width.saturating_sub(1))
        .min(inner.width / 3);
    // Label column, then the y axis line.
    let x = inner.x + left_labels + 1;
    // x labels and the x axis line take the bottom two rows.
    let height = inner.height.saturating_sub(2);
    Rect::new(x, inner.y, inner.right().saturating_sub(x), height)
}

impl<'a> Widget for ChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(LEGEND_WIDTH)])
            .split(area);
        let (chart_area, legend_area) = (cols[0], cols[1]);

        let block = Block::default()
            .title(format!(" {} ", self.chart.title))
            .title_style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(chart_area);

        let (y_lo, y_hi) = self.y_range();
        let x_labels = self.x_labels();
        let y_labels = self.y_labels(y_lo, y_hi);
        let y_label_width = y_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let first_x_width = x_labels.first().map(|l| l.chars().count()).unwrap_or(0) as u16;

        let points: Vec<Vec<(f64, f64)>> = self
            .chart
            .lines
            .iter()
            .map(|line| {
                line.points(&self.chart.observations)
                    .into_iter()
                    .map(|(d, v)| (self.x_of(d), v))
                    .collect()
            })
            .collect();

        let datasets: Vec<Dataset> = self
            .chart
            .lines
            .iter()
            .zip(&points)
            .map(|(line, data)| {
                let (color, dash) = match line.style {
                    MarkStyle::Line { color, dash } => (color, dash),
                    MarkStyle::Shade { color, .. } => (color, LineStyle::Solid),
                };
                let ds = Dataset::default()
                    .name(line.label.clone())
                    .style(Style::default().fg(self.theme.series_color(color)))
                    .data(data);
                match dash {
                    LineStyle::Solid => ds.marker(symbols::Marker::Braille).graph_type(GraphType::Line),
                    LineStyle::Dashed => ds.marker(symbols::Marker::Dot).graph_type(GraphType::Scatter),
                }
            })
            .collect();

        let axis_style = Style::default().fg(self.theme.muted);
        let chart = Chart::new(datasets)
            .block(block)
            .legend_position(None)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, self.x_max()])
                    .labels(x_labels.into_iter().map(Span::raw).collect::<Vec<_>>()),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([y_lo, y_hi])
                    .labels(y_labels.into_iter().map(Span::raw).collect::<Vec<_>>()),
            );
        chart.render(chart_area, buf);

        // The chart clears its canvas background, so shading goes on after.
        // Only backgrounds change; line glyphs keep their colors.
        self.paint_overlays(plot_area(inner, y_label_width, first_x_width), buf);

        let mut legend = vec![Line::from(Span::styled(
            self.chart.y_label.clone(),
            Style::default().fg(self.theme.text_secondary),
        ))];
        legend.push(Line::from(""));
        legend.extend(self.legend_lines());
        Paragraph::new(legend)
            .block(
                Block::default()
                    .title(" Legend ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.muted)),
            )
            .render(legend_area, buf);
    }
}

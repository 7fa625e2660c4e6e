//! Summary table - one row per plotted series
//!
//! Columns: series label, first and last month, point count, latest value,
//! min, max, and the latest 6- and 12-period averages.

use econgadget_core::overlay::SeriesSummary;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use crate::theme::Theme;

pub struct SummaryPanel<'a> {
    summaries: &'a [SeriesSummary],
    theme: &'a Theme,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(summaries: &'a [SeriesSummary], theme: &'a Theme) -> Self {
        Self { summaries, theme }
    }

    /// Rows needed to show every summary, borders and header included.
    pub fn height(&self) -> u16 {
        self.summaries.len() as u16 + 3
    }

    fn format_avg(value: Option<f64>) -> String {
        value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
    }
}

impl<'a> Widget for SummaryPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted))
            .style(Style::default().bg(self.theme.background));

        let header_cells = ["Series", "From", "To", "N", "Latest", "Min", "Max", "6-Mo", "12-Mo"]
            .iter()
            .map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            });
        let header = Row::new(header_cells).height(1);

        let rows = self.summaries.iter().map(|s| {
            Row::new(vec![
                Cell::from(s.label.clone()),
                Cell::from(s.first.format("%Y-%m").to_string()),
                Cell::from(s.last.format("%Y-%m").to_string()),
                Cell::from(s.count.to_string()),
                Cell::from(format!("{:.2}", s.latest)),
                Cell::from(format!("{:.2}", s.min)),
                Cell::from(format!("{:.2}", s.max)),
                Cell::from(Self::format_avg(s.latest_avg_6)),
                Cell::from(Self::format_avg(s.latest_avg_12)),
            ])
            .style(Style::default().fg(self.theme.text_primary))
        });

        let widths = [
            Constraint::Min(18),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(9),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);
    }
}

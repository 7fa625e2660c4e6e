//! Terms panel - recent office-holders and their years
//!
//! Rows keep the page order. The swatch color matches the overlay color the
//! term gets on a chart.

use econgadget_core::overlay::color_for;
use econgadget_core::TermRecord;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use crate::theme::Theme;

pub struct TermsPanel<'a> {
    terms: &'a [TermRecord],
    title: String,
    theme: &'a Theme,
}

impl<'a> TermsPanel<'a> {
    pub fn new(terms: &'a [TermRecord], title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            terms,
            title: title.into(),
            theme,
        }
    }
}

impl<'a> Widget for TermsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ({} terms) ", self.title, self.terms.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let header = Row::new(["", "Name", "Start", "End", "Years"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        }));

        let rows = self.terms.iter().enumerate().map(|(i, t)| {
            Row::new(vec![
                Cell::from("██").style(Style::default().fg(self.theme.series_color(color_for(i)))),
                Cell::from(t.name.clone()),
                Cell::from(t.start_year.to_string()),
                Cell::from(t.end_year.to_string()),
                Cell::from(t.span_years().to_string()),
            ])
            .style(Style::default().fg(self.theme.text_primary))
        });

        let widths = [
            Constraint::Length(2),
            Constraint::Min(24),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_terms_in_order() {
        let theme = Theme::default();
        let terms = vec![
            TermRecord::new("Barack Obama", 2009, 2017),
            TermRecord::new("Donald Trump", 2017, 2021),
        ];
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        TermsPanel::new(&terms, "Presidential Terms", &theme).render(area, &mut buf);

        let line = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect()
        };
        assert!(line(0).contains("Presidential Terms (2 terms)"));
        assert!(line(2).contains("Barack Obama"));
        assert!(line(2).contains("2009"));
        assert!(line(3).contains("Donald Trump"));
        assert_eq!(
            buf.cell((1, 2)).unwrap().fg,
            theme.series_color(color_for(0))
        );
    }
}

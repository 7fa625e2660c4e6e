//! Menu panel - the four top-level actions.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::MenuItem;
use crate::theme::Theme;

pub struct MenuPanel<'a> {
    cursor: usize,
    recent_years: u32,
    theme: &'a Theme,
}

impl<'a> MenuPanel<'a> {
    pub fn new(cursor: usize, recent_years: u32, theme: &'a Theme) -> Self {
        Self {
            cursor,
            recent_years,
            theme,
        }
    }
}

impl<'a> Widget for MenuPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from("")];
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let label = format!("{}. {}", i + 1, item.label(self.recent_years));
            let line = if i == self.cursor {
                Line::from(vec![
                    Span::styled(" ▶ ", Style::default().fg(self.theme.accent)),
                    Span::styled(
                        label,
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::raw("   "),
                    Span::styled(label, Style::default().fg(self.theme.text_primary)),
                ])
            };
            lines.push(line);
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "   ↑/↓ or j/k to move, Enter to select, q to quit",
            Style::default().fg(self.theme.muted),
        )));

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Economy Gadget ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .style(Style::default().bg(self.theme.background)),
            )
            .render(area, buf);
    }
}

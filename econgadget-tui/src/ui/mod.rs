//! Top-level UI layout: active screen with status bar.

pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{AppState, Screen};
use crate::panels::{ChartPanel, MenuPanel, SummaryPanel, TermsPanel};
use crate::theme::Theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState, theme: &Theme) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    match &app.screen {
        Screen::Menu => {
            f.render_widget(MenuPanel::new(app.menu_cursor, app.recent_years, theme), main_area);
        }
        Screen::Chart { chart, .. } => {
            let summary = SummaryPanel::new(&chart.summaries, theme);
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(summary.height())])
                .split(main_area);
            f.render_widget(ChartPanel::new(chart, theme), rows[0]);
            f.render_widget(summary, rows[1]);
        }
        Screen::Terms(terms) => {
            let title = format!("Presidential Terms (Last {} Years)", app.recent_years);
            f.render_widget(TermsPanel::new(terms, title, theme), main_area);
        }
    }

    status_bar::render(f, status_area, app);
}

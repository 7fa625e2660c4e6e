//! Application state: single-owner, main-thread only.
//!
//! Key handling turns input into an `Action`; the event loop runs the action
//! against the pipeline and feeds the result back through `show_chart`,
//! `show_terms` or `set_error`.

use econgadget_core::overlay::ChartData;
use econgadget_core::{ChartOutcome, Dataset, TermRecord};

/// Top-level menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    PlotCpi,
    PlotUnemployment,
    ViewTerms,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::PlotCpi,
        MenuItem::PlotUnemployment,
        MenuItem::ViewTerms,
        MenuItem::Exit,
    ];

    pub fn label(self, recent_years: u32) -> String {
        match self {
            MenuItem::PlotCpi => Dataset::Cpi.menu_label().to_string(),
            MenuItem::PlotUnemployment => Dataset::Unemployment.menu_label().to_string(),
            MenuItem::ViewTerms => {
                format!("View Presidential Terms (Last {recent_years} Years)")
            }
            MenuItem::Exit => "Exit".to_string(),
        }
    }

    pub fn action(self) -> Action {
        match self {
            MenuItem::PlotCpi => Action::Plot(Dataset::Cpi),
            MenuItem::PlotUnemployment => Action::Plot(Dataset::Unemployment),
            MenuItem::ViewTerms => Action::ShowTerms,
            MenuItem::Exit => Action::Quit,
        }
    }
}

/// Work requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Plot(Dataset),
    /// Same as `Plot`, ignoring the cached payload.
    Refresh(Dataset),
    ShowTerms,
    Quit,
}

/// What fills the main area.
#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    Chart {
        dataset: Dataset,
        chart: Box<ChartData>,
    },
    Terms(Vec<TermRecord>),
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct AppState {
    pub running: bool,
    pub screen: Screen,
    pub menu_cursor: usize,
    pub status_message: Option<(String, StatusLevel)>,
    pub recent_years: u32,
}

impl AppState {
    pub fn new(recent_years: u32) -> Self {
        Self {
            running: true,
            screen: Screen::Menu,
            menu_cursor: 0,
            status_message: None,
            recent_years,
        }
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.menu_cursor.min(MenuItem::ALL.len() - 1)]
    }

    pub fn cursor_down(&mut self) {
        self.menu_cursor = (self.menu_cursor + 1) % MenuItem::ALL.len();
    }

    pub fn cursor_up(&mut self) {
        self.menu_cursor = (self.menu_cursor + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Report a failed action. The current screen is left as it was.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    pub fn show_chart(&mut self, dataset: Dataset, outcome: ChartOutcome) {
        let points = outcome.chart.observations.len();
        match &outcome.terms_warning {
            Some(w) => self.set_warning(format!("Terms unavailable, no overlays: {w}")),
            None => self.set_status(format!(
                "{} points, {} terms ({} payload{})",
                points,
                outcome.chart.overlays.len(),
                match outcome.source {
                    econgadget_core::data::PayloadSource::Cache => "cached",
                    econgadget_core::data::PayloadSource::Network => "fetched",
                },
                if outcome.skipped_points > 0 {
                    format!(", {} points skipped", outcome.skipped_points)
                } else {
                    String::new()
                }
            )),
        }
        self.screen = Screen::Chart {
            dataset,
            chart: Box::new(outcome.chart),
        };
    }

    pub fn show_terms(&mut self, terms: Vec<TermRecord>) {
        if terms.is_empty() {
            self.set_warning("No recent terms found on the page");
        } else {
            self.set_status(format!("{} recent terms", terms.len()));
        }
        self.screen = Screen::Terms(terms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels() {
        let labels: Vec<String> = MenuItem::ALL.iter().map(|m| m.label(10)).collect();
        assert_eq!(
            labels,
            vec![
                "Plot CPI Trends",
                "Plot Unemployment Trends",
                "View Presidential Terms (Last 10 Years)",
                "Exit"
            ]
        );
    }

    #[test]
    fn cursor_wraps() {
        let mut app = AppState::new(10);
        app.cursor_up();
        assert_eq!(app.selected(), MenuItem::Exit);
        app.cursor_down();
        assert_eq!(app.selected(), MenuItem::PlotCpi);
    }

    #[test]
    fn error_keeps_screen() {
        let mut app = AppState::new(10);
        app.show_terms(vec![TermRecord::new("Joe Biden", 2021, 2025)]);
        app.set_error("timeout");
        assert!(matches!(app.screen, Screen::Terms(_)));
        assert_eq!(
            app.status_message,
            Some(("timeout".to_string(), StatusLevel::Error))
        );
    }
}

//! Econgadget TUI: menu-driven labor-statistics charts in the terminal.
//!
//! Screens:
//! 1. Menu: plot CPI, plot unemployment, list recent terms, exit
//! 2. Chart: series lines over shaded terms, legend, summary table
//! 3. Terms: recent office-holders and their years

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use econgadget_core::{AppConfig, LiveServices, Pipeline};
use econgadget_tui::app::{Action, AppState};
use econgadget_tui::theme::Theme;
use econgadget_tui::{input, ui};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    let config = AppConfig::load_default().context("failed to load config")?;
    let cache_dir = config.resolved_cache_dir()?;
    init_logging(&cache_dir)?;
    log::info!("cache dir: {}", cache_dir.display());

    let services = LiveServices::from_config(&config)?;
    let pipeline = services.pipeline(&config);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(config.recent_years);
    if config.api_key.is_none() {
        app.set_warning("No API key configured; using the keyless request tier");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &pipeline);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to `<cache_dir>/econgadget.log`; stderr would draw over the screen.
fn init_logging(cache_dir: &Path) -> Result<()> {
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("failed to create {}", cache_dir.display()))?;
    let log_path = cache_dir.join("econgadget.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(terminal: &mut Term, app: &mut AppState, pipeline: &Pipeline<'_>) -> Result<()> {
    let theme = Theme::default();
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app, &theme))?;

        // 2. Poll for input (250ms tick; nothing animates)
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = input::handle_key(app, key) {
                    app.set_status("Loading...");
                    terminal.draw(|f| ui::draw(f, app, &theme))?;
                    perform(app, pipeline, action);
                }
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Run one action synchronously. Failures land in the status bar and leave
/// the current screen in place.
fn perform(app: &mut AppState, pipeline: &Pipeline<'_>, action: Action) {
    let today = Local::now().date_naive();
    match action {
        Action::Plot(dataset) | Action::Refresh(dataset) => {
            let force = matches!(action, Action::Refresh(_));
            match pipeline.chart(dataset, today, force) {
                Ok(outcome) => app.show_chart(dataset, outcome),
                Err(e) => {
                    log::error!("{dataset} chart failed: {e}");
                    app.set_error(format!("Failed to load {dataset}: {e}"));
                }
            }
        }
        Action::ShowTerms => match pipeline.recent_terms(today) {
            Ok(terms) => app.show_terms(terms),
            Err(e) => {
                log::error!("term fetch failed: {e}");
                app.set_error(format!("Failed to load terms: {e}"));
            }
        },
        Action::Quit => app.running = false,
    }
}

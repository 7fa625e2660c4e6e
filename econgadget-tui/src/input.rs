//! Keyboard input dispatch: global keys, then screen-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Action, AppState, MenuItem, Screen};

/// Handle a key event. Returns the action the event loop should run, if any.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Action> {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return None;
    }

    match &app.screen {
        Screen::Menu => handle_menu_key(app, key),
        Screen::Chart { dataset, .. } => {
            let dataset = *dataset;
            match key.code {
                KeyCode::Char('r') => Some(Action::Refresh(dataset)),
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace => {
                    app.back_to_menu();
                    None
                }
                _ => None,
            }
        }
        Screen::Terms(_) => {
            if matches!(
                key.code,
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter
            ) {
                app.back_to_menu();
            }
            None
        }
    }
}

fn handle_menu_key(app: &mut AppState, key: KeyEvent) -> Option<Action> {
    let chosen = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            return None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor_down();
            return None;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor_up();
            return None;
        }
        KeyCode::Enter => app.selected(),
        KeyCode::Char(c @ '1'..='4') => {
            app.menu_cursor = c as usize - '1' as usize;
            app.selected()
        }
        _ => return None,
    };

    match chosen.action() {
        Action::Quit => {
            app.running = false;
            None
        }
        action => Some(action),
    }
}

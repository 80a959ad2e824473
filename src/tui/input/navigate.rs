use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything; ? and Esc close it
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        // Movement
        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g') | KeyCode::Home) => {
            app.cursor = 0;
        }
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.item_count().saturating_sub(1);
        }

        // Triggers
        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => app.toggle_cursor(),
        (_, KeyCode::Char('d') | KeyCode::Delete) => app.remove_cursor(),
        (_, KeyCode::Char('a') | KeyCode::Char('i')) => {
            app.mode = Mode::Input;
            app.input_buffer.clear();
            app.input_cursor = 0;
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.item_count();
    if len == 0 {
        return;
    }
    let next = app.cursor.saturating_add_signed(delta);
    app.cursor = next.min(len - 1);
}

//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  While the lightbox is open
//! it captures the keyboard; otherwise keys act on the focused section.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm below that calls it.
//! 3. Update the help text in `ui::draw_status_bar`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.lightbox.is_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.lightbox.close(),
            KeyCode::Left | KeyCode::Char('h') => app.lightbox.prev(),
            KeyCode::Right | KeyCode::Char('l') => app.lightbox.next(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Tab => app.switch_section(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('p') => app.open_lightbox(),
        _ => {}
    }
}

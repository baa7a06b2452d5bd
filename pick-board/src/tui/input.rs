// Keyboard input handling.
//
// Translates crossterm key events into board actions. Enter on a list row is
// the "click" on that entry; committing a dropdown option is the selector's
// change event.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand::Quit)` when the TUI should exit; every other
/// key is handled locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both press and release
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // The alert blocks everything until dismissed
    if view_state.board.alert().is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            view_state.board.dismiss_alert();
        }
        return None;
    }

    if view_state.dropdown_open {
        handle_dropdown_key(key_event, view_state);
        return None;
    }

    let regions = view_state.board.regions();
    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        KeyCode::Up | KeyCode::Char('k') if regions.sidebar => {
            view_state.list_cursor = view_state.list_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') if regions.sidebar => {
            let last = view_state.board.list_entries().len().saturating_sub(1);
            view_state.list_cursor = (view_state.list_cursor + 1).min(last);
            None
        }
        KeyCode::Home if regions.sidebar => {
            view_state.list_cursor = 0;
            None
        }
        KeyCode::End if regions.sidebar => {
            view_state.list_cursor = view_state.board.list_entries().len().saturating_sub(1);
            None
        }

        KeyCode::Enter if regions.sidebar => {
            view_state.board.select(view_state.list_cursor);
            None
        }
        KeyCode::Enter | KeyCode::Char('d') if regions.dropdown => {
            open_dropdown(view_state);
            None
        }

        _ => None,
    }
}

fn open_dropdown(view_state: &mut ViewState) {
    view_state.dropdown_open = true;
    view_state.dropdown_cursor = view_state.board.dropdown_choice();
}

/// Keys while the dropdown popup is open:
/// - Up/Down (or k/j) move the highlight, Home/End jump
/// - Enter commits the highlighted option and closes
/// - Esc closes without a change event
fn handle_dropdown_key(key_event: KeyEvent, view_state: &mut ViewState) {
    let last = view_state.board.dropdown_options().len().saturating_sub(1);
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.dropdown_cursor = view_state.dropdown_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.dropdown_cursor = (view_state.dropdown_cursor + 1).min(last);
        }
        KeyCode::Home => view_state.dropdown_cursor = 0,
        KeyCode::End => view_state.dropdown_cursor = last,
        KeyCode::Enter => {
            let value = view_state
                .board
                .dropdown_options()
                .get(view_state.dropdown_cursor)
                .map(|option| option.value.clone());
            if let Some(value) = value {
                view_state.board.change_dropdown(&value);
            }
            view_state.dropdown_open = false;
        }
        KeyCode::Esc => view_state.dropdown_open = false,
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

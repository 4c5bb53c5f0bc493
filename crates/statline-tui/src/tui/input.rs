// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s for the app state, or
// into local `ViewState` changes (scrolling, quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::UserCommand;

/// Lines moved by PageUp/PageDown.
const PAGE_SCROLL: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key changes what the table shows or
/// quits. Returns `None` when the key was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        // Selectors
        KeyCode::Char('t') => Some(UserCommand::NextTeam),
        KeyCode::Char('T') => Some(UserCommand::PrevTeam),
        KeyCode::Char('y') => Some(UserCommand::NextYear),
        KeyCode::Char('Y') => Some(UserCommand::PrevYear),
        KeyCode::Char('s') => Some(UserCommand::NextSort),
        KeyCode::Char('S') => Some(UserCommand::PrevSort),
        KeyCode::Char('m') => Some(UserCommand::NextTerm),
        KeyCode::Char('l') | KeyCode::Char(' ') => Some(UserCommand::LoadMore),
        KeyCode::Esc => Some(UserCommand::ClearFilters),

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SCROLL);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SCROLL);
            None
        }
        KeyCode::Home => {
            view_state.scroll_offset = 0;
            None
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// `y`/`q` confirm, `n`/Esc cancel, everything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_sub(lines);
}

/// The upper bound is applied at render time, when the row count is known.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

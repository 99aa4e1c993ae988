// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s for the app, or into
// local `ViewState` changes (selection movement, quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use warroom_core::player::PlayerId;

use super::ViewState;
use crate::app::UserCommand;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// `available` is the current available pool in display order; the
/// selection indexes into it. Returns a command when the key press needs the
/// app to act, `None` when it only changed view state.
pub fn handle_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    available: &[PlayerId],
) -> Option<UserCommand> {
    // On Windows crossterm emits both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    let len = available.len();
    match key_event.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.select_next(len, 1);
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.select_prev(1);
            None
        }
        KeyCode::PageDown => {
            view_state.select_next(len, PAGE_SIZE);
            None
        }
        KeyCode::PageUp => {
            view_state.select_prev(PAGE_SIZE);
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            view_state.selected = 0;
            None
        }
        KeyCode::End | KeyCode::Char('G') => {
            view_state.selected = len.saturating_sub(1);
            None
        }
        KeyCode::Enter | KeyCode::Char('d') => available
            .get(view_state.selected)
            .copied()
            .map(UserCommand::Draft),
        KeyCode::Esc => {
            view_state.status_message = None;
            None
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('n') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

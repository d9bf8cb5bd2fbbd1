// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (focus switching,
// dropdown navigation, alert dismissal).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::protocol::UserCommand;
use crate::selection::Slot;

use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator (search input, selection, compare, quit). Returns
/// `None` when the key press was handled locally by mutating `ViewState`
/// or should be ignored.
pub fn handle_key(key_event: KeyEvent, view: &mut ViewState) -> Option<UserCommand> {
    // On Windows, crossterm emits both Press and Release events for each
    // physical keypress; ignoring non-Press events prevents double input.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // A raised alert is blocking: only dismissal gets through.
    if view.alert.is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            view.alert = None;
        }
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('q') => Some(UserCommand::Quit),
            KeyCode::Char('x') => Some(UserCommand::ClearSlot(view.focus)),
            KeyCode::Char('t') => Some(UserCommand::CycleStatsType),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Tab => {
            view.focus = view.focus.other();
            None
        }

        KeyCode::Esc => {
            // The "click outside" analogue: hide the focused dropdown.
            let pane = view.results.get_mut(view.focus);
            pane.visible = false;
            None
        }

        KeyCode::Up => {
            let pane = view.results.get_mut(view.focus);
            if pane.visible {
                pane.highlighted = pane.highlighted.saturating_sub(1);
            }
            None
        }

        KeyCode::Down => {
            let pane = view.results.get_mut(view.focus);
            if pane.visible {
                let max = pane.rows().map(|rows| rows.len()).unwrap_or(0).saturating_sub(1);
                pane.highlighted = (pane.highlighted + 1).min(max);
            }
            None
        }

        KeyCode::Enter => {
            let slot = view.focus;
            let pane = view.results.get(slot);
            if pane.visible && pane.rows().is_some_and(|rows| !rows.is_empty()) {
                return Some(UserCommand::SelectResult {
                    slot,
                    index: pane.highlighted,
                });
            }
            if view.compare_enabled && !view.comparing {
                return Some(UserCommand::Compare);
            }
            None
        }

        KeyCode::Backspace => {
            let slot = view.focus;
            view.search_input.get_mut(slot).pop();
            Some(UserCommand::SearchInput {
                slot,
                text: view.search_input.get(slot).clone(),
            })
        }

        KeyCode::Char(c) => {
            let slot = view.focus;
            view.search_input.get_mut(slot).push(c);
            Some(UserCommand::SearchInput {
                slot,
                text: view.search_input.get(slot).clone(),
            })
        }

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

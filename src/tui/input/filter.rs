use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

use super::*;

/// Filter mode: every keystroke re-runs the filter, so the list narrows as
/// the user types.
pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: drop the query entirely
        (_, KeyCode::Esc) => {
            app.filter_input.clear();
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }

        // Accept: keep the query applied and go back to navigating
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Backspace) => {
            app.filter_input.pop();
            app.clamp_cursor();
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.filter_input.push(c);
            app.clamp_cursor();
        }

        _ => {}
    }
}

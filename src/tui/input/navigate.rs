use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::notify::NotifyEvent;
use crate::ops::task_ops;
use crate::ops::views::SortKey;

use crate::tui::app::{App, ConfirmAction, Mode, View};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Help overlay
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        // Cursor movement
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
            let count = app.visible_ids().len();
            app.cursor = count.saturating_sub(1);
        }

        // View switching
        (_, KeyCode::Char('1')) => switch_view(app, View::All),
        (_, KeyCode::Char('2')) => switch_view(app, View::Upcoming),
        (_, KeyCode::Char('3')) => switch_view(app, View::Completed),
        (_, KeyCode::Tab) => {
            let current = View::ALL.iter().position(|&v| v == app.view).unwrap_or(0);
            switch_view(app, View::ALL[(current + 1) % View::ALL.len()]);
        }

        // Sort: cycle insertion order -> name -> due date -> priority
        (_, KeyCode::Char('s')) => {
            app.sort = match app.sort {
                None => Some(SortKey::Name),
                Some(SortKey::Name) => Some(SortKey::DueDate),
                Some(SortKey::DueDate) => Some(SortKey::Priority),
                Some(SortKey::Priority) => None,
            };
        }

        // Filter
        (_, KeyCode::Char('/')) => {
            app.mode = Mode::Filter;
        }
        (_, KeyCode::Esc) => {
            if !app.filter_input.is_empty() {
                app.filter_input.clear();
                app.clamp_cursor();
            }
        }

        // Task actions
        (_, KeyCode::Char('a')) => open_add_form(app),
        (_, KeyCode::Char('e')) => open_edit_form(app),
        (_, KeyCode::Char(' ')) | (_, KeyCode::Enter) => mark_selected_done(app),
        (KeyModifiers::NONE, KeyCode::Char('d')) => request_delete(app),
        (KeyModifiers::SHIFT, KeyCode::Char('D')) => request_delete_all(app),

        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: i32) {
    let count = app.visible_ids().len();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    let max = count - 1;
    app.cursor = if delta < 0 {
        app.cursor.saturating_sub(1)
    } else {
        (app.cursor + 1).min(max)
    };
}

fn switch_view(app: &mut App, view: View) {
    if app.view != view {
        app.view = view;
        app.cursor = 0;
        app.scroll_offset = 0;
    }
}

/// Mark the task under the cursor completed. One-way: a completed task
/// stays completed, silently.
pub(super) fn mark_selected_done(app: &mut App) {
    let Some(id) = app.selected_id() else {
        app.warn("Please select a task first.");
        return;
    };
    let Some(task) = app.tasks.get(id) else {
        return;
    };
    if task.is_completed() {
        return;
    }
    let name = task.name.clone();
    if task_ops::mark_done(&mut app.tasks, id).is_ok() {
        app.announce(NotifyEvent::TaskCompleted { name });
        // The row may have left the Upcoming view
        app.clamp_cursor();
    }
}

pub(super) fn request_delete(app: &mut App) {
    let Some(id) = app.selected_id() else {
        app.warn("Please select a task to delete.");
        return;
    };
    app.confirm = Some(ConfirmAction::DeleteTask { id });
    app.mode = Mode::Confirm;
}

pub(super) fn request_delete_all(app: &mut App) {
    if app.tasks.is_empty() {
        app.warn("There are no tasks to delete.");
        return;
    }
    app.confirm = Some(ConfirmAction::DeleteAll);
    app.mode = Mode::Confirm;
}

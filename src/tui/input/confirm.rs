use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::notify::NotifyEvent;
use crate::ops::task_ops;

use crate::tui::app::{App, ConfirmAction, Mode};

use super::*;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(action) = action {
                match action {
                    ConfirmAction::DeleteTask { id } => confirm_delete_task(app, id),
                    ConfirmAction::DeleteAll => confirm_delete_all(app),
                }
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

pub(super) fn confirm_delete_task(app: &mut App, id: crate::model::task::TaskId) {
    // The row can only vanish between request and confirm if the id was
    // already deleted; nothing to do then.
    if let Ok(task) = task_ops::remove_task(&mut app.tasks, id) {
        app.notified.remove(&id);
        app.clamp_cursor();
        app.announce(NotifyEvent::TaskDeleted { name: task.name });
    }
}

pub(super) fn confirm_delete_all(app: &mut App) {
    let count = task_ops::remove_all(&mut app.tasks);
    app.notified.clear();
    app.cursor = 0;
    app.scroll_offset = 0;
    app.announce(NotifyEvent::AllTasksDeleted { count });
}

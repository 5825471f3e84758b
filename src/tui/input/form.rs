use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::notify::NotifyEvent;
use crate::ops::task_ops;
use crate::tui::app::{App, DATE_FORMAT, FormField, FormState, Mode};
use crate::util::unicode;

use super::*;

/// Open the add form with a fresh task due now
pub(super) fn open_add_form(app: &mut App) {
    let now = chrono::Local::now().naive_local();
    app.form = Some(FormState::add(now));
    app.mode = Mode::Form;
}

/// Open the edit form prefilled from the task under the cursor
pub(super) fn open_edit_form(app: &mut App) {
    let Some(id) = app.selected_id() else {
        app.warn("Please select a task first.");
        return;
    };
    let Some(task) = app.tasks.get(id) else {
        return;
    };
    app.form = Some(FormState::edit(task));
    app.mode = Mode::Form;
}

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    // A fresh keystroke clears the last validation message
    form.error = None;

    match (key.modifiers, key.code) {
        // Cancel without touching the list
        (_, KeyCode::Esc) => {
            app.form = None;
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Enter) => submit_form(app),

        // Field focus
        (_, KeyCode::Tab) | (_, KeyCode::Down) => focus_field(form, 1),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => focus_field(form, -1),

        // Text editing on the name/due fields
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) if form.field.is_text() => {
            let (buffer, cursor) = active_text(form);
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        (_, KeyCode::Backspace) if form.field.is_text() => {
            let (buffer, cursor) = active_text(form);
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.drain(prev..*cursor);
                *cursor = prev;
            }
        }
        (_, KeyCode::Left) if form.field.is_text() => {
            let (buffer, cursor) = active_text(form);
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        (_, KeyCode::Right) if form.field.is_text() => {
            let (buffer, cursor) = active_text(form);
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        (_, KeyCode::Home) if form.field.is_text() => {
            let (_, cursor) = active_text(form);
            *cursor = 0;
        }
        (_, KeyCode::End) if form.field.is_text() => {
            let (buffer, cursor) = active_text(form);
            *cursor = buffer.len();
        }

        // Choice fields cycle with left/right or space
        (_, KeyCode::Right) | (_, KeyCode::Char(' ')) => cycle_choice(form, 1),
        (_, KeyCode::Left) => cycle_choice(form, -1),

        _ => {}
    }
}

/// Move focus through the form's fields, wrapping at the ends
fn focus_field(form: &mut FormState, delta: i32) {
    let fields = form.fields();
    let current = fields.iter().position(|&f| f == form.field).unwrap_or(0);
    let next = if delta < 0 {
        (current + fields.len() - 1) % fields.len()
    } else {
        (current + 1) % fields.len()
    };
    form.field = fields[next];
}

/// The buffer and cursor of the focused text field
fn active_text(form: &mut FormState) -> (&mut String, &mut usize) {
    match form.field {
        FormField::Due => (&mut form.due, &mut form.due_cursor),
        _ => (&mut form.name, &mut form.name_cursor),
    }
}

fn cycle_choice(form: &mut FormState, delta: i32) {
    match form.field {
        FormField::Priority => {
            form.priority = if delta < 0 {
                form.priority.prev()
            } else {
                form.priority.next()
            };
        }
        FormField::Status => form.status = form.status.toggled(),
        FormField::Reminder => form.reminder = !form.reminder,
        _ => {}
    }
}

/// Validate and apply the form. On failure the form stays open with the
/// message; the list is untouched.
pub(super) fn submit_form(app: &mut App) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let due = match NaiveDateTime::parse_from_str(form.due.trim(), DATE_FORMAT) {
        Ok(due) => due,
        Err(_) => {
            if let Some(form) = app.form.as_mut() {
                form.error = Some("due date must look like 2024-01-31 18:30".to_string());
            }
            return;
        }
    };

    let target = form.target;
    let name = form.name.clone();
    let status = form.status;
    let priority = form.priority;
    let reminder = form.reminder;

    let result = match target {
        None => task_ops::add_task(&mut app.tasks, &name, due, priority, reminder),
        Some(id) => task_ops::edit_task(&mut app.tasks, id, &name, due, status, priority),
    };

    match result {
        Ok(id) => {
            app.form = None;
            app.mode = Mode::Navigate;
            // A changed due time may arm or disarm the reminder check
            app.notified.remove(&id);
            // Land the cursor on the saved row
            if let Some(position) = app.visible_ids().iter().position(|&v| v == id) {
                app.cursor = position;
            } else {
                app.clamp_cursor();
            }
            // An edit rebuilds the record through the same append path as an
            // add, and announces the same way.
            app.announce(NotifyEvent::TaskAdded {
                name: name.trim().to_string(),
            });
        }
        Err(err) => {
            if let Some(form) = app.form.as_mut() {
                form.error = Some(err.to_string());
            }
        }
    }
}

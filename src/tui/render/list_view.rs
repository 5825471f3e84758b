use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Status;
use crate::tui::app::{App, DATE_FORMAT, View};
use crate::util::unicode;

use super::push_highlighted_spans;

/// Render the task list for the current view
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let ids = app.visible_ids();

    if ids.is_empty() {
        let message = if !app.filter_input.is_empty() {
            " No tasks match the filter"
        } else {
            match app.view {
                View::All => " No tasks yet \u{2014} press a to add one",
                View::Upcoming => " No upcoming tasks",
                View::Completed => " No completed tasks",
            }
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    // Clamp cursor and scroll to the visible window
    let cursor = app.cursor.min(ids.len() - 1);
    app.cursor = cursor;
    let visible_height = area.height as usize;
    let mut scroll = app.scroll_offset;
    if cursor < scroll {
        scroll = cursor;
    } else if visible_height > 0 && cursor >= scroll + visible_height {
        scroll = cursor + 1 - visible_height;
    }
    app.scroll_offset = scroll;

    let now = chrono::Local::now().naive_local();
    let filter_re = app.filter_highlight_re();
    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (row, id) in ids.iter().enumerate() {
        let Some(task) = app.tasks.get(*id) else {
            continue;
        };
        let is_cursor = row == cursor;
        let bg = if is_cursor {
            app.theme.selection_bg
        } else {
            app.theme.background
        };

        let mut spans: Vec<Span> = Vec::new();

        // Cursor column
        if is_cursor {
            spans.push(Span::styled(
                "\u{258E}",
                Style::default().fg(app.theme.selection_border).bg(bg),
            ));
        } else {
            spans.push(Span::styled(" ", Style::default().bg(bg)));
        }

        // Checkbox
        let checkbox = match task.status {
            Status::Pending => "[ ] ",
            Status::Completed => "[x] ",
        };
        spans.push(Span::styled(
            checkbox,
            Style::default()
                .fg(app.theme.status_color(task.status))
                .bg(bg),
        ));

        // Right columns: due date + priority label
        let due_str = task.due.format(DATE_FORMAT).to_string();
        let priority_str = format!("{:<6}", task.priority.label());
        let right_width = due_str.chars().count() + 2 + priority_str.chars().count() + 1;

        // Name, truncated to the space left of the right columns
        let prefix_width: usize = spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        let available = width.saturating_sub(prefix_width + right_width + 1);
        let display_name = super::truncate_with_ellipsis(&task.name, available);

        let name_color = app.theme.status_color(task.status);
        let name_style = if is_cursor {
            Style::default()
                .fg(name_color)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(name_color).bg(bg)
        };
        let hl_style = Style::default()
            .fg(app.theme.filter_match_fg)
            .bg(app.theme.filter_match_bg)
            .add_modifier(Modifier::BOLD);
        push_highlighted_spans(
            &mut spans,
            &display_name,
            name_style,
            hl_style,
            filter_re.as_ref(),
        );

        // Pad so the right columns line up
        let content_width: usize = spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        let right_start = width.saturating_sub(right_width);
        if content_width < right_start {
            spans.push(Span::styled(
                " ".repeat(right_start - content_width),
                Style::default().bg(bg),
            ));
        }

        // Due date, flagged when a pending task is already past it
        let due_color = if task.is_overdue(now) {
            app.theme.overdue
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(due_str, Style::default().fg(due_color).bg(bg)));
        spans.push(Span::styled("  ", Style::default().bg(bg)));

        spans.push(Span::styled(
            priority_str,
            Style::default()
                .fg(app.theme.priority_color(task.priority))
                .bg(bg),
        ));

        // Right edge buffer
        let final_width: usize = spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        if final_width < width {
            spans.push(Span::styled(
                " ".repeat(width - final_width),
                Style::default().bg(bg),
            ));
        }

        lines.push(Line::from(spans));
    }

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(scroll)
        .take(visible_height)
        .collect();

    let paragraph =
        Paragraph::new(visible_lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::ops::task_ops::{add_task, mark_done};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn empty_list_prompts_to_add() {
        let mut app = test_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert!(output.contains("No tasks yet"));
    }

    #[test]
    fn rows_show_name_due_and_priority() {
        let mut app = test_app();
        add_task(&mut app.tasks, "Buy milk", due(1), Priority::High, false).unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert!(output.contains("[ ] Buy milk"));
        assert!(output.contains("2024-01-01 10:00"));
        assert!(output.contains("High"));
    }

    #[test]
    fn completed_tasks_get_a_checked_box() {
        let mut app = test_app();
        let id = add_task(&mut app.tasks, "Buy milk", due(1), Priority::Low, false).unwrap();
        mark_done(&mut app.tasks, id).unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert!(output.contains("[x] Buy milk"));
    }

    #[test]
    fn upcoming_view_hides_completed_rows() {
        let mut app = test_app();
        let done = add_task(&mut app.tasks, "Done one", due(1), Priority::Low, false).unwrap();
        add_task(&mut app.tasks, "Open one", due(2), Priority::Low, false).unwrap();
        mark_done(&mut app.tasks, done).unwrap();
        app.view = crate::tui::app::View::Upcoming;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert!(output.contains("Open one"));
        assert!(!output.contains("Done one"));
    }
}

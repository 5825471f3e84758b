use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ConfirmAction, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(message) = &app.status_message {
                let color = if app.status_is_error {
                    app.theme.warning
                } else {
                    app.theme.text
                };
                Line::from(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(color).bg(bg),
                ))
            } else if let Some(toast) = &app.toast {
                Line::from(Span::styled(
                    format!(" {}", toast.text),
                    Style::default().fg(app.theme.accent).bg(bg),
                ))
            } else {
                hint_line(
                    app,
                    width,
                    " a add  e edit  Space done  d delete  / filter  s sort",
                    "? help  q quit",
                )
            }
        }
        Mode::Filter => {
            // Filter prompt: /query▌
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.filter_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled(
                    "\u{258C}",
                    Style::default().fg(app.theme.accent).bg(bg),
                ),
            ];
            let count = app.visible_ids().len();
            spans.push(Span::styled(
                format!("  {} match{}", count, if count == 1 { "" } else { "es" }),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
            let hint = "Enter apply  Esc clear";
            let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let hint_width = hint.chars().count();
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                spans.push(Span::styled(
                    hint,
                    Style::default().fg(app.theme.dim).bg(bg),
                ));
            }
            Line::from(spans)
        }
        Mode::Form => hint_line(
            app,
            width,
            " Tab next field  Enter save",
            "Esc cancel",
        ),
        Mode::Confirm => {
            let prompt = match &app.confirm {
                Some(ConfirmAction::DeleteTask { id }) => {
                    let name = app
                        .tasks
                        .get(*id)
                        .map(|t| t.name.as_str())
                        .unwrap_or("task");
                    format!(" Delete \"{}\"? (y/n)", name)
                }
                Some(ConfirmAction::DeleteAll) => {
                    format!(" Delete ALL {} tasks? (y/n)", app.tasks.len())
                }
                None => String::new(),
            };
            Line::from(Span::styled(
                prompt,
                Style::default().fg(app.theme.warning).bg(bg),
            ))
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Left hint text with a right-aligned secondary hint
fn hint_line<'a>(app: &App, width: usize, left: &'a str, right: &'a str) -> Line<'a> {
    let bg = app.theme.background;
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let mut spans = vec![Span::styled(left, dim_style)];
    let left_width = left.chars().count();
    let right_width = right.chars().count();
    if left_width + right_width < width {
        let padding = width - left_width - right_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(right, dim_style));
    }
    Line::from(spans)
}

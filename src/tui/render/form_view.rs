use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField, FormState};
use crate::util::unicode;

/// Render the add/edit popup over the list
pub fn render_form_view(frame: &mut Frame, app: &App, area: Rect) {
    let form = match &app.form {
        Some(form) => form,
        None => return,
    };

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);

    // Sizing: 60% width, min 40, max 60
    let target_w = (area.width as f32 * 0.6) as u16;
    let popup_w = target_w.clamp(40, 60).min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" ".repeat(inner_w), bg_style)));

    for &field in form.fields() {
        let focused = form.field == field;
        let mut spans: Vec<Span> = Vec::new();

        // Focus indicator + label column
        let indicator = if focused { " \u{25B6} " } else { "   " };
        spans.push(Span::styled(
            indicator,
            Style::default().fg(app.theme.accent).bg(bg),
        ));
        let label_style = if focused {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        spans.push(Span::styled(format!("{:<10}", field.label()), label_style));
        spans.push(Span::styled("  ", bg_style));

        push_field_value(&mut spans, app, form, field, focused);

        pad_to_width(&mut spans, inner_w, bg_style);
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(" ".repeat(inner_w), bg_style)));
    }

    // Validation message
    if let Some(error) = &form.error {
        let text = format!(" {}", error);
        let mut spans = vec![Span::styled(
            text,
            Style::default().fg(app.theme.overdue).bg(bg),
        )];
        pad_to_width(&mut spans, inner_w, bg_style);
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(" ".repeat(inner_w), bg_style)));
    }

    // Key hints
    let hint = " Tab next field  \u{2190}\u{2192} change  Enter save  Esc cancel";
    let mut hint_spans = vec![Span::styled(
        hint,
        Style::default().fg(app.theme.dim).bg(bg),
    )];
    pad_to_width(&mut hint_spans, inner_w, bg_style);
    lines.push(Line::from(hint_spans));

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let title_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Span::styled(format!(" {} ", form.title()), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.text).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}

/// Push the value spans for one field, with a cursor mark on focused text
/// fields and arrows on focused choice fields.
fn push_field_value<'a>(
    spans: &mut Vec<Span<'a>>,
    app: &App,
    form: &FormState,
    field: FormField,
    focused: bool,
) {
    let bg = app.theme.background;
    let value_style = Style::default().fg(app.theme.text_bright).bg(bg);

    match field {
        FormField::Name | FormField::Due => {
            let (buffer, cursor) = if field == FormField::Name {
                (&form.name, form.name_cursor)
            } else {
                (&form.due, form.due_cursor)
            };
            if focused {
                let cursor = cursor.min(buffer.len());
                spans.push(Span::styled(buffer[..cursor].to_string(), value_style));
                spans.push(Span::styled(
                    "\u{258C}",
                    Style::default().fg(app.theme.accent).bg(bg),
                ));
                spans.push(Span::styled(buffer[cursor..].to_string(), value_style));
            } else {
                spans.push(Span::styled(buffer.clone(), value_style));
            }
        }
        FormField::Status => {
            push_choice(spans, app, form.status.label(), focused);
        }
        FormField::Priority => {
            let style = Style::default()
                .fg(app.theme.priority_color(form.priority))
                .bg(bg);
            push_choice_styled(spans, app, form.priority.label(), focused, style);
        }
        FormField::Reminder => {
            let label = if form.reminder { "YES" } else { "NO" };
            push_choice(spans, app, label, focused);
        }
    }
}

fn push_choice<'a>(spans: &mut Vec<Span<'a>>, app: &App, label: &str, focused: bool) {
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.background);
    push_choice_styled(spans, app, label, focused, style);
}

fn push_choice_styled<'a>(
    spans: &mut Vec<Span<'a>>,
    app: &App,
    label: &str,
    focused: bool,
    style: Style,
) {
    let bg = app.theme.background;
    if focused {
        spans.push(Span::styled(
            "\u{2039} ",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        spans.push(Span::styled(label.to_string(), style));
        spans.push(Span::styled(
            " \u{203A}",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(label.to_string(), style));
    }
}

/// Pad spans to fill `target_width` with background
fn pad_to_width(spans: &mut Vec<Span<'_>>, target_width: usize, pad_style: Style) {
    let total_used: usize = spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum();
    if total_used < target_width {
        spans.push(Span::styled(
            " ".repeat(target_width - total_used),
            pad_style,
        ));
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(
        &mut lines,
        " \u{2191}\u{2193}/jk",
        "Move cursor up/down",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Views", header_style)));
    add_binding(
        &mut lines,
        " 1/2/3",
        "All / Upcoming / Completed",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " Tab", "Next view", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Tasks", header_style)));
    add_binding(&mut lines, " a", "Add a task", key_style, desc_style);
    add_binding(&mut lines, " e", "Edit the selected task", key_style, desc_style);
    add_binding(
        &mut lines,
        " Space/Enter",
        "Mark the selected task done",
        key_style,
        desc_style,
    );
    add_binding(
        &mut lines,
        " d",
        "Delete the selected task",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " D", "Delete all tasks", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Filter & Sort", header_style)));
    add_binding(
        &mut lines,
        " /",
        "Filter tasks by name",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " Esc", "Clear the filter", key_style, desc_style);
    add_binding(
        &mut lines,
        " s",
        "Cycle sort: name, due date, priority",
        key_style,
        desc_style,
    );
    lines.push(Line::from(""));

    add_binding(&mut lines, " ?", "Close this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.text).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// Push one "key  description" row
fn add_binding(lines: &mut Vec<Line>, key: &str, desc: &str, key_style: Style, desc_style: Style) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<14}", key), key_style),
        Span::styled(desc.to_string(), desc_style),
    ]));
}

/// A rect centered in `area` taking the given percentages of its size
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

/// Render the tab bar: app title + view tabs, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    // App title block
    spans.push(Span::styled(
        " TaskIT ",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.header)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        " ",
        Style::default().bg(app.theme.background),
    ));
    sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
    spans.push(sep.clone());

    // One tab per view
    for view in View::ALL {
        let is_current = app.view == view;
        spans.push(Span::styled(
            format!(" {} ", view.label()),
            tab_style(app, is_current),
        ));
        sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(tabs, area);
    sep_cols
}

/// Separator row with `┴` joints under the tab dividers and the active
/// sort/filter shown at the right edge.
fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let dim = app.theme.dim;

    // Build indicator spans for active sort/filter
    let mut indicator_spans: Vec<Span> = Vec::new();
    if let Some(key) = app.sort {
        indicator_spans.push(Span::styled(
            "sort: ",
            Style::default().fg(dim).bg(bg),
        ));
        indicator_spans.push(Span::styled(
            key.label(),
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    }
    if !app.filter_input.is_empty() {
        if !indicator_spans.is_empty() {
            indicator_spans.push(Span::styled("  ", Style::default().bg(bg)));
        }
        indicator_spans.push(Span::styled(
            "filter: ",
            Style::default().fg(dim).bg(bg),
        ));
        indicator_spans.push(Span::styled(
            app.filter_input.clone(),
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    }

    let indicator_width: usize = indicator_spans
        .iter()
        .map(|s| s.content.chars().count())
        .sum();

    // +2: one space before indicator, one space after (right edge buffer)
    let separator_end = if indicator_width > 0 {
        width.saturating_sub(indicator_width + 2)
    } else {
        width
    };

    let mut sep_text = String::with_capacity(separator_end * 3);
    for col in 0..separator_end {
        if sep_cols.contains(&col) {
            sep_text.push('\u{2534}');
        } else {
            sep_text.push('\u{2500}');
        }
    }

    let mut spans: Vec<Span> = vec![Span::styled(sep_text, Style::default().fg(dim).bg(bg))];
    if indicator_width > 0 {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator_spans);
        let current_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if current_width < width {
            spans.push(Span::styled(
                " ".repeat(width - current_width),
                Style::default().bg(bg),
            ));
        }
    }

    let sep_widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::views::SortKey;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn tabs_show_all_views() {
        let app = test_app();
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        assert!(output.contains("TaskIT"));
        assert!(output.contains("All"));
        assert!(output.contains("Upcoming"));
        assert!(output.contains("Completed"));
    }

    #[test]
    fn separator_shows_sort_and_filter() {
        let mut app = test_app();
        app.sort = Some(SortKey::Priority);
        app.filter_input = "milk".to_string();
        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_tab_bar(frame, &app, area);
        });
        assert!(output.contains("sort: priority"));
        assert!(output.contains("filter: milk"));
    }
}

use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::{Priority, Status};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub header: Color,
    pub accent: Color,
    pub highlight: Color,
    pub done: Color,
    pub overdue: Color,
    pub warning: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub filter_match_bg: Color,
    pub filter_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x2D, 0x40, 0x59),
            text: Color::Rgb(0xDE, 0xE4, 0xEE),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x8A, 0x9B, 0xB5),
            header: Color::Rgb(0xEA, 0x54, 0x55),
            accent: Color::Rgb(0xFF, 0xD4, 0x60),
            highlight: Color::Rgb(0xF0, 0x7B, 0x3F),
            done: Color::Rgb(0x32, 0xCD, 0x32),
            overdue: Color::Rgb(0xEA, 0x54, 0x55),
            warning: Color::Rgb(0xFF, 0xD4, 0x60),
            selection_bg: Color::Rgb(0x3D, 0x54, 0x74),
            selection_border: Color::Rgb(0xFF, 0xD4, 0x60),
            filter_match_bg: Color::Rgb(0xFF, 0xD4, 0x60),
            filter_match_fg: Color::Rgb(0x2D, 0x40, 0x59),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "header" => theme.header = color,
                    "accent" => theme.accent = color,
                    "highlight" => theme.highlight = color,
                    "done" => theme.done = color,
                    "overdue" => theme.overdue = color,
                    "warning" => theme.warning = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    "filter_match_bg" => theme.filter_match_bg = color,
                    "filter_match_fg" => theme.filter_match_fg = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Row text color for a task status
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Pending => self.text,
            Status::Completed => self.done,
        }
    }

    /// Label color for a priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.header,
            Priority::Medium => self.accent,
            Priority::Low => self.dim,
        }
    }
}

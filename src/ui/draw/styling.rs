//! Styling utilities and color schemes
//!
//! Color helpers shared by the panels, plus the per-theme palette.

use crate::status::StatusClass;
use crate::types::{HttpMethod, Theme};
use ratatui::style::Color;

/// Get the color for an HTTP method
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::Get => Color::Green,
        HttpMethod::Post => Color::Blue,
        HttpMethod::Put => Color::Yellow,
        HttpMethod::Delete => Color::Red,
        HttpMethod::Patch => Color::Cyan,
    }
}

/// Get the color for a status bucket
pub fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Informational => Color::Blue,
        StatusClass::Success => Color::Green,
        StatusClass::Redirection => Color::Yellow,
        StatusClass::ClientError => Color::Rgb(255, 140, 0),
        StatusClass::ServerError => Color::Red,
        StatusClass::Unknown => Color::Gray,
    }
}

/// Method column width for consistent formatting
pub const METHOD_COLUMN_WIDTH: usize = 7;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub label: Color,
    pub focused_border: Color,
    pub unfocused_border: Color,
    pub highlight_bg: Color,
    pub modal_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                label: Color::LightCyan,
                focused_border: Color::Cyan,
                unfocused_border: Color::DarkGray,
                highlight_bg: Color::DarkGray,
                modal_bg: Color::Rgb(30, 30, 30),
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::Rgb(245, 245, 245),
                muted: Color::Gray,
                accent: Color::Blue,
                label: Color::Rgb(0, 110, 110),
                focused_border: Color::Blue,
                unfocused_border: Color::Gray,
                highlight_bg: Color::Rgb(210, 220, 235),
                modal_bg: Color::Rgb(235, 235, 235),
            },
        }
    }

    pub fn border(&self, focused: bool) -> Color {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }
}

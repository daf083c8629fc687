//! Reusable UI components
//!
//! Header bar and the footer with key help and the current hint.

use super::styling::Palette;
use crate::state::AppState;
use crate::types::{ComposerField, Focus, InputMode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with busy indicator and theme
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let palette = Palette::for_theme(state.ui.theme);

    let status = if state.is_busy() {
        format!("{} Sending...", SPINNER[spinner_index % SPINNER.len()])
    } else {
        "Ready".to_string()
    };

    let line = Line::from(vec![
        Span::styled(
            "restless",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(palette.muted)),
        Span::styled(status, Style::default().fg(palette.fg)),
        Span::styled(
            format!(" | {} history | theme: {:?}", state.history.len(), state.ui.theme),
            Style::default().fg(palette.muted),
        ),
    ]);

    let header = Paragraph::new(line)
        .style(Style::default().bg(palette.bg))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer with command help, or the pending hint if there is one
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = Palette::for_theme(state.ui.theme);

    let (text, style) = match &state.ui.hint {
        Some(hint) => (
            hint.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            footer_help(state.ui.input_mode, state.ui.focus).to_string(),
            Style::default().fg(palette.muted),
        ),
    };

    let footer = Paragraph::new(text)
        .style(style.bg(palette.bg))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

fn footer_help(mode: InputMode, focus: Focus) -> &'static str {
    match mode {
        InputMode::Editing(ComposerField::Body) => {
            "Esc:Done Enter:Newline Ctrl+W:Del word Ctrl+L:Clear"
        }
        InputMode::Editing(_) => "Esc/Enter:Done Ctrl+W:Del word Ctrl+L:Clear",
        InputMode::ConfirmClearHistory => "y:Clear history n/Esc:Cancel",
        InputMode::Normal => match focus {
            Focus::Composer => {
                "j/k:Field Enter:Edit m:Method a:Add header x:Del header f:Format | Space:Send Tab:Panel t:Theme q:Quit"
            }
            Focus::History => "j/k:Nav Enter:Load c:Clear | Space:Send Tab:Panel t:Theme q:Quit",
            Focus::Response => {
                "h:Raw headers b:Raw body y:Copy body Y:Copy headers Ctrl+d/u:Scroll | Tab:Panel q:Quit"
            }
        },
    }
}

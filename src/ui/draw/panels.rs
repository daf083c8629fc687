//! Main panel rendering
//!
//! This module contains rendering functions for the three main panels:
//! - Composer (top left) - method, URL, header rows and body
//! - History (bottom left) - past sends, newest first
//! - Response (right side) - status line, headers and body

use super::styling::{method_color, status_color, Palette, METHOD_COLUMN_WIDTH};
use crate::presenter;
use crate::state::AppState;
use crate::status::StatusClass;
use crate::types::{
    ComposerField, CopyTarget, DisplayedResponse, Focus, HistoryEntry, InputMode, RequestBody,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::time::Instant;

/// Render the request composer
pub fn render_composer_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = Palette::for_theme(state.ui.theme);
    let focused = state.ui.focus == Focus::Composer;
    let selected = state.selected_field();
    let editing = match state.ui.input_mode {
        InputMode::Editing(field) => Some(field),
        _ => None,
    };
    let composer = &state.composer;
    let draft = composer.draft();

    let field_style = |field: ComposerField| {
        if editing == Some(field) {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else if focused && selected == field {
            Style::default()
                .fg(palette.fg)
                .bg(palette.highlight_bg)
        } else {
            Style::default().fg(palette.fg)
        }
    };

    // Text for a single-line field, taken from the edit buffer while editing
    let field_text = |field: ComposerField| {
        if editing == Some(field) {
            with_cursor(state.ui.line_editor.content(), state.ui.line_editor.cursor())
        } else {
            composer.field_text(field)
        }
    };

    let label = Style::default().fg(palette.label);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Method  ", label),
            Span::styled(
                format!(" {} ", draft.method),
                field_style(ComposerField::Method)
                    .fg(method_color(draft.method))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("URL     ", label),
            Span::styled(field_text(ComposerField::Url), field_style(ComposerField::Url)),
        ]),
        Line::from(Span::styled("Headers", label)),
    ];

    for idx in 0..composer.header_rows().len() {
        let key = ComposerField::HeaderKey(idx);
        let value = ComposerField::HeaderValue(idx);
        let key_text = field_text(key);
        let value_text = field_text(value);
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(placeholder(key_text, "key"), field_style(key)),
            Span::styled(": ", Style::default().fg(palette.muted)),
            Span::styled(placeholder(value_text, "value"), field_style(value)),
        ]));
    }

    if draft.method.sends_body() {
        let body_style = field_style(ComposerField::Body);
        let kind = match draft.body {
            RequestBody::Structured(_) => " (json)",
            _ => "",
        };
        lines.push(Line::from(Span::styled(format!("Body{kind}"), label)));

        let editor = composer.body_editor();
        let text = if editing == Some(ComposerField::Body) {
            with_cursor(editor.content(), editor.cursor())
        } else {
            editor.content().to_string()
        };
        if draft.body.is_empty() && editing != Some(ComposerField::Body) {
            lines.push(Line::from(Span::styled(
                "  (empty)",
                body_style.fg(palette.muted),
            )));
        }
        for body_line in text.lines() {
            lines.push(Line::from(Span::styled(format!("  {body_line}"), body_style)));
        }
    }

    let block = Block::default()
        .title("[1] Request")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border(focused)));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(palette.bg))
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render the history list
pub fn render_history_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = Palette::for_theme(state.ui.theme);
    let focused = state.ui.focus == Focus::History;
    let block = Block::default()
        .title(format!("[2] History ({})", state.history.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border(focused)));

    if state.history.is_empty() {
        let empty = Paragraph::new("No request history yet.")
            .style(Style::default().fg(palette.muted).bg(palette.bg))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let flashing = state.is_history_flashing(Instant::now());
    let items: Vec<ListItem> = state
        .history
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let mut line = history_line(entry, &palette);
            if idx == 0 && flashing {
                line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().bg(palette.bg))
        .block(block)
        .highlight_style(
            Style::default()
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(if focused { ">> " } else { "   " });

    let mut list_state = ListState::default().with_selected(Some(state.ui.selected_history));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render the response viewer
pub fn render_response_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = Palette::for_theme(state.ui.theme);
    let focused = state.ui.focus == Focus::Response;
    let block = Block::default()
        .title("[3] Response")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border(focused)));

    let Some(response) = &state.current_response else {
        let empty = Paragraph::new("No response yet.")
            .style(Style::default().fg(palette.muted).bg(palette.bg))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let lines = response_lines(response, state, &palette, Instant::now());
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.presenter.scroll, 0));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Private Helper Functions
// ============================================================================

fn response_lines<'a>(
    response: &'a DisplayedResponse,
    state: &AppState,
    palette: &Palette,
    now: Instant,
) -> Vec<Line<'a>> {
    let view = &state.presenter;
    let label = Style::default()
        .fg(palette.label)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(palette.muted);

    let mut status_style = Style::default()
        .fg(status_color(StatusClass::from(&response.status)))
        .add_modifier(Modifier::BOLD);
    if view.is_pulsing(now) {
        status_style = status_style.add_modifier(Modifier::REVERSED);
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", response.status), status_style),
            Span::raw(" "),
            Span::styled(response.status_text.as_str(), status_style.remove_modifier(Modifier::REVERSED)),
        ]),
        if response.status.is_error() {
            Line::from(Span::styled("Request failed before a response arrived", muted))
        } else {
            Line::from(Span::styled(
                format!(
                    "Time: {} ms   Size: {}",
                    response.time_ms,
                    presenter::format_size(response.size)
                ),
                muted,
            ))
        },
        Line::default(),
        section_title(
            "Headers",
            view.raw_headers,
            view.recently_copied(CopyTarget::Headers, now),
            label,
            muted,
        ),
    ];

    if view.raw_headers {
        for line in presenter::headers_raw_text(&response.headers).lines() {
            lines.push(Line::from(line.to_string()));
        }
    } else if response.headers.is_empty() {
        lines.push(Line::from(Span::styled("  (none)", muted)));
    } else {
        for (key, value) in presenter::headers_pretty_lines(&response.headers) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key}: "), Style::default().fg(palette.accent)),
                Span::raw(value),
            ]));
        }
    }

    if presenter::has_body(&response.body) {
        lines.push(Line::default());
        lines.push(section_title(
            "Body",
            view.raw_body,
            view.recently_copied(CopyTarget::Body, now),
            label,
            muted,
        ));
        let body_lines = if view.raw_body {
            presenter::body_raw_lines(&response.raw)
        } else {
            presenter::body_pretty_lines(&response.body)
        };
        lines.extend(body_lines.into_iter().map(Line::from));
    }

    lines
}

/// One history row: status, method, URL and status text
fn history_line<'a>(entry: &'a HistoryEntry, palette: &Palette) -> Line<'a> {
    let status = entry.status.to_string();
    let status_style = Style::default()
        .fg(status_color(StatusClass::from_text(&status)))
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(format!("{status:>5} "), status_style),
        Span::styled(
            format!("{:width$}", entry.request.method.as_str(), width = METHOD_COLUMN_WIDTH),
            Style::default().fg(method_color(entry.request.method)),
        ),
        Span::styled(entry.request.url.as_str(), Style::default().fg(palette.fg)),
        Span::styled(format!(" {}", entry.status_text), Style::default().fg(palette.muted)),
    ])
}

fn section_title<'a>(
    name: &'a str,
    raw: bool,
    copied: bool,
    label: Style,
    muted: Style,
) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!("{name}:"), label),
        Span::styled(if raw { " [raw]" } else { " [pretty]" }, muted),
    ];
    if copied {
        spans.push(Span::styled(
            "  Copied!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Insert a cursor marker at a byte offset
fn with_cursor(text: &str, cursor: usize) -> String {
    let mut shown = text.to_string();
    let at = cursor.min(shown.len());
    if shown.is_char_boundary(at) {
        shown.insert(at, '▏');
    }
    shown
}

fn placeholder(text: String, fallback: &str) -> String {
    if text.is_empty() {
        format!("<{fallback}>")
    } else {
        text
    }
}

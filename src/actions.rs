use crate::state::AppState;
use crate::types::{ComposerField, CopyTarget, Focus, InputMode, Theme};
use crossterm::event::KeyEvent;
use std::time::Instant;

/// Lines moved per scroll action (Ctrl+U / Ctrl+D)
pub const SCROLL_LINES_PER_ACTION: u16 = 5;

/// Represents all possible state-changing actions in the application
/// This pattern separates input handling from state mutations, making the code
/// more testable
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation actions
    FocusNext,
    FocusPrev,
    FocusPanel(Focus),
    FieldUp,
    FieldDown,

    // Composer actions
    CycleMethod,
    StartEditing,
    StopEditing,
    EditorKey(KeyEvent),
    EditorPaste(String),
    AddHeaderRow,
    RemoveHeaderRow,
    FormatBody,

    // History actions
    HistoryUp,
    HistoryDown,
    SelectHistory,
    EnterConfirmClearHistory,
    ConfirmClearHistory,
    CancelClearHistory,

    // Response actions
    ToggleRawHeaders,
    ToggleRawBody,
    ScrollUp,
    ScrollDown,
    MarkCopied(CopyTarget),

    // Misc
    SetTheme(Theme),
    SetHint(String),
    ClearHint,
}

/// Apply an action to the application state
/// All UI state mutations go through this function
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::FocusNext => {
            state.ui.focus = state.ui.focus.next();
        }
        AppAction::FocusPrev => {
            state.ui.focus = state.ui.focus.prev();
        }
        AppAction::FocusPanel(focus) => {
            state.ui.focus = focus;
        }
        AppAction::FieldUp => {
            state.ui.selected_field = state.ui.selected_field.saturating_sub(1);
        }
        AppAction::FieldDown => {
            let last = state.composer.fields().len().saturating_sub(1);
            state.ui.selected_field = (state.ui.selected_field + 1).min(last);
        }

        // Composer
        AppAction::CycleMethod => {
            state.composer.cycle_method();
            state.clamp_selected_field();
        }
        AppAction::StartEditing => match state.selected_field() {
            ComposerField::Method => {
                state.composer.cycle_method();
                state.clamp_selected_field();
            }
            ComposerField::Body => {
                state.ui.input_mode = InputMode::Editing(ComposerField::Body);
            }
            field => {
                state.ui.line_editor =
                    crate::editor::TextEditor::single_line(&state.composer.field_text(field));
                state.ui.input_mode = InputMode::Editing(field);
            }
        },
        AppAction::StopEditing => {
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::EditorKey(key) => match state.ui.input_mode {
            InputMode::Editing(ComposerField::Body) => {
                state.composer.edit_body(|editor| editor.handle_key_event(key));
            }
            InputMode::Editing(field) => {
                if state.ui.line_editor.handle_key_event(key) {
                    let text = state.ui.line_editor.content().to_string();
                    state.composer.set_field_text(field, &text);
                }
            }
            _ => {}
        },
        AppAction::EditorPaste(text) => match state.ui.input_mode {
            InputMode::Editing(ComposerField::Body) => {
                state
                    .composer
                    .edit_body(|editor| editor.insert_str_normalized(&text));
            }
            InputMode::Editing(field) => {
                state.ui.line_editor.insert_str_normalized(&text);
                let text = state.ui.line_editor.content().to_string();
                state.composer.set_field_text(field, &text);
            }
            _ => {}
        },
        AppAction::AddHeaderRow => {
            let idx = state.composer.add_header_row();
            if let Some(pos) = state
                .composer
                .fields()
                .iter()
                .position(|f| *f == ComposerField::HeaderKey(idx))
            {
                state.ui.selected_field = pos;
            }
        }
        AppAction::RemoveHeaderRow => match state.selected_field() {
            ComposerField::HeaderKey(idx) | ComposerField::HeaderValue(idx) => {
                if !state.composer.remove_header_row(idx) {
                    state.ui.hint = Some("Cannot remove the only header row".to_string());
                }
                state.clamp_selected_field();
            }
            _ => {
                state.ui.hint = Some("Select a header row to remove".to_string());
            }
        },
        AppAction::FormatBody => {
            if let Err(e) = state.composer.format_body() {
                state.ui.hint = Some(e);
            }
        }

        // History
        AppAction::HistoryUp => {
            state.ui.selected_history = state.ui.selected_history.saturating_sub(1);
        }
        AppAction::HistoryDown => {
            let last = state.history.len().saturating_sub(1);
            state.ui.selected_history = (state.ui.selected_history + 1).min(last);
        }
        AppAction::SelectHistory => {
            let idx = state.ui.selected_history;
            state.select_history(idx);
        }
        AppAction::EnterConfirmClearHistory => {
            if !state.history.is_empty() {
                state.ui.input_mode = InputMode::ConfirmClearHistory;
            }
        }
        AppAction::ConfirmClearHistory => {
            state.clear_history();
            state.ui.input_mode = InputMode::Normal;
        }
        AppAction::CancelClearHistory => {
            state.ui.input_mode = InputMode::Normal;
        }

        // Response
        AppAction::ToggleRawHeaders => state.presenter.toggle_raw_headers(),
        AppAction::ToggleRawBody => state.presenter.toggle_raw_body(),
        AppAction::ScrollUp => state.presenter.scroll_up(SCROLL_LINES_PER_ACTION),
        AppAction::ScrollDown => state.presenter.scroll_down(SCROLL_LINES_PER_ACTION),
        AppAction::MarkCopied(target) => {
            state.presenter.mark_copied(target, Instant::now());
        }

        // Misc
        AppAction::SetTheme(theme) => {
            state.ui.theme = theme;
        }
        AppAction::SetHint(hint) => {
            state.ui.hint = Some(hint);
        }
        AppAction::ClearHint => {
            state.ui.hint = None;
        }
    }
}

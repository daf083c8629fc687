//! Composer panel handlers: field navigation and text editing

use super::helpers::{apply, collect_paste_batch};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::ComposerField;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

pub fn handle_composer_key(key: KeyEvent, state: Arc<RwLock<AppState>>) {
    let action = match key.code {
        KeyCode::Char('j') | KeyCode::Down => AppAction::FieldDown,
        KeyCode::Char('k') | KeyCode::Up => AppAction::FieldUp,
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('i') => AppAction::StartEditing,
        KeyCode::Char('m') => AppAction::CycleMethod,
        KeyCode::Char('a') | KeyCode::Char('+') => AppAction::AddHeaderRow,
        KeyCode::Char('x') | KeyCode::Char('-') => AppAction::RemoveHeaderRow,
        KeyCode::Char('f') => AppAction::FormatBody,
        _ => return,
    };
    apply(state, action);
}

/// Keys while a field is being edited. Everything except the finishing keys
/// goes to the editor. Returns an event read past a typed burst that still
/// needs dispatching.
pub fn handle_editing_key(
    key: KeyEvent,
    field: ComposerField,
    state: Arc<RwLock<AppState>>,
) -> Option<Event> {
    match key.code {
        KeyCode::Esc => apply(state, AppAction::StopEditing),
        KeyCode::Enter if field != ComposerField::Body => apply(state, AppAction::StopEditing),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (batch, count, leftover) = collect_paste_batch(c);
            if count > 1 {
                apply(state, AppAction::EditorPaste(batch));
            } else {
                apply(state, AppAction::EditorKey(key));
            }
            return leftover;
        }
        _ => apply(state, AppAction::EditorKey(key)),
    }
    None
}

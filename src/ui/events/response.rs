//! Response panel handlers: raw/pretty toggles, scrolling and copying

use super::helpers::apply;
use super::yank::handle_yank;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::CopyTarget;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

pub fn handle_response_key(key: KeyEvent, state: Arc<RwLock<AppState>>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('d') if ctrl => AppAction::ScrollDown,
        KeyCode::Char('u') if ctrl => AppAction::ScrollUp,
        KeyCode::Char('j') | KeyCode::Down => AppAction::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => AppAction::ScrollUp,
        KeyCode::Char('h') => AppAction::ToggleRawHeaders,
        KeyCode::Char('b') => AppAction::ToggleRawBody,
        KeyCode::Char('y') => return handle_yank(state, CopyTarget::Body),
        KeyCode::Char('Y') => return handle_yank(state, CopyTarget::Headers),
        _ => return,
    };
    apply(state, action);
}

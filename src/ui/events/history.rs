//! History panel handlers

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

pub fn handle_history_key(key: KeyEvent, state: Arc<RwLock<AppState>>) {
    let action = match key.code {
        KeyCode::Char('j') | KeyCode::Down => AppAction::HistoryDown,
        KeyCode::Char('k') | KeyCode::Up => AppAction::HistoryUp,
        KeyCode::Enter => AppAction::SelectHistory,
        KeyCode::Char('c') => AppAction::EnterConfirmClearHistory,
        _ => return,
    };
    apply(state, action);
}

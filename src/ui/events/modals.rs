//! Modal input handlers

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

/// Handle y/n in the clear history confirmation modal
pub fn handle_clear_history_confirmation(key: KeyEvent, state: Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            apply(state, AppAction::ConfirmClearHistory);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::CancelClearHistory);
        }
        _ => {}
    }
}

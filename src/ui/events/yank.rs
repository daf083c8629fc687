//! Yank (copy) handlers
//!
//! Copies the raw response body or the headers (as JSON) to the system
//! clipboard.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::presenter::copy_text;
use crate::state::AppState;
use crate::types::CopyTarget;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};

pub fn handle_yank(state: Arc<RwLock<AppState>>, target: CopyTarget) {
    let text = match state.read() {
        Ok(s) => s
            .current_response
            .as_ref()
            .map(|response| copy_text(response, target)),
        Err(_) => return,
    };

    let Some(text) = text else {
        tracing::debug!("No response available to yank");
        return;
    };

    let action = match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => {
            tracing::debug!("Copied {target:?} to clipboard");
            AppAction::MarkCopied(target)
        }
        Err(e) => {
            tracing::warn!("Failed to copy to clipboard: {e}");
            AppAction::SetHint(format!("Clipboard unavailable: {e}"))
        }
    };
    apply(state, action);
}

//! Helper functions for event handling
//!
//! This module contains utility functions used across event handlers:
//! - State locking helpers (apply actions)
//! - Paste batching

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Apply a single action to state
pub fn apply(state: Arc<RwLock<AppState>>, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately available
/// character events and batches them together. Terminals without bracketed
/// paste deliver a paste as a burst of key events.
///
/// Returns the batched string, its character count, and the event that ended
/// the batch. That event has not been handled yet and must be dispatched.
pub fn collect_paste_batch(initial_char: char) -> (String, usize, Option<Event>) {
    let mut chars = vec![initial_char];
    let mut leftover = None;

    while let Ok(true) = event::poll(Duration::from_millis(0)) {
        let Ok(next) = event::read() else {
            break;
        };
        if matches!(&next, Event::Key(key) if key.kind != KeyEventKind::Press) {
            continue;
        }
        match batchable_char(&next) {
            Some(c) => chars.push(c),
            None => {
                leftover = Some(next);
                break;
            }
        }
    }

    let count = chars.len();
    (chars.into_iter().collect(), count, leftover)
}

/// The character a key press contributes to a paste batch, if any
fn batchable_char(event: &Event) -> Option<char> {
    match event {
        Event::Key(key) => match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(c),
            _ => None,
        },
        _ => None,
    }
}

//! Event handling system for restless
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles three input modes:
//! - Normal: Panel navigation and commands
//! - Editing: Keys go to the text editor of the selected composer field
//! - ConfirmClearHistory: y/n modal before history is wiped
//!
//! # Architecture
//!
//! The EventHandler uses an action pattern where input events generate AppActions
//! that are applied to AppState via the apply_action function in actions.rs.
//! Work that needs more than the state (sending, saving config) is returned to
//! the caller as a `Command`.
//!
//! # Lock Management
//!
//! Locks on Arc<RwLock<AppState>> are held only for the duration of one read or
//! one action, never across a blocking call.

mod composer;
mod helpers;
mod history;
mod modals;
mod response;
mod yank;

pub use helpers::apply;

use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::{Focus, InputMode};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Requests the event loop hands back to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Submit,
    ToggleTheme,
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
    /// Read while batching typed input, handled on the next call
    pending: Option<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait briefly for input and dispatch it based on the input mode
    pub fn handle_events(&mut self, state: Arc<RwLock<AppState>>) -> Result<Option<Command>> {
        let event = match self.pending.take() {
            Some(event) => event,
            None => {
                if !event::poll(Duration::from_millis(50))? {
                    return Ok(None);
                }
                event::read()?
            }
        };

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(self.handle_key(key, state))
            }
            Event::Paste(text) => {
                let editing = state
                    .read()
                    .map(|s| matches!(s.ui.input_mode, InputMode::Editing(_)))
                    .unwrap_or(false);
                if editing {
                    apply(state, AppAction::EditorPaste(text));
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, state: Arc<RwLock<AppState>>) -> Option<Command> {
        let (input_mode, focus) = match state.read() {
            Ok(s) => (s.ui.input_mode, s.ui.focus),
            Err(_) => return None,
        };

        match input_mode {
            InputMode::Editing(field) => {
                self.pending = composer::handle_editing_key(key, field, state);
                None
            }
            InputMode::ConfirmClearHistory => {
                modals::handle_clear_history_confirmation(key, state);
                None
            }
            InputMode::Normal => {
                apply(Arc::clone(&state), AppAction::ClearHint);
                self.handle_normal_key(key, focus, state)
            }
        }
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        focus: Focus,
        state: Arc<RwLock<AppState>>,
    ) -> Option<Command> {
        match key.code {
            // QUIT
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            // SEND
            KeyCode::Char(' ') => Some(Command::Submit),
            KeyCode::Char('t') => Some(Command::ToggleTheme),

            // PANEL FOCUS
            KeyCode::Tab => {
                apply(state, AppAction::FocusNext);
                None
            }
            KeyCode::BackTab => {
                apply(state, AppAction::FocusPrev);
                None
            }
            KeyCode::Char('1') => {
                apply(state, AppAction::FocusPanel(Focus::Composer));
                None
            }
            KeyCode::Char('2') => {
                apply(state, AppAction::FocusPanel(Focus::History));
                None
            }
            KeyCode::Char('3') => {
                apply(state, AppAction::FocusPanel(Focus::Response));
                None
            }

            _ => {
                match focus {
                    Focus::Composer => composer::handle_composer_key(key, state),
                    Focus::History => history::handle_history_key(key, state),
                    Focus::Response => response::handle_response_key(key, state),
                }
                None
            }
        }
    }
}

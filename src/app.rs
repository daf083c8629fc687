use crate::actions::AppAction;
use crate::config::Config;
use crate::history::HistoryStore;
use crate::request;
use crate::state::AppState;
use crate::types::InputMode;
use crate::ui::{self, draw, Command};
use color_eyre::Result;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use reqwest::Client;
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    config: Config,
    client: Client,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let history = HistoryStore::load(Config::history_path()?, config.history.max_entries);
        let client = request::build_client(&config.request)?;

        tracing::info!("Starting with {:?} theme", config.ui.theme);

        let state = AppState::new(history, config.ui.theme);

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            config,
            client,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            match self.event_handler.handle_events(Arc::clone(&self.state))? {
                Some(Command::Submit) => self.submit(),
                Some(Command::ToggleTheme) => self.toggle_theme(),
                None => {}
            }
        }

        Ok(())
    }

    /// Start a send unless one is already running or the URL is blank
    fn submit(&self) {
        let claimed = match self.state.write() {
            Ok(mut s) => s.begin_submit(),
            Err(_) => return,
        };

        match claimed {
            Ok(draft) => request::submit_background(
                Arc::clone(&self.state),
                self.client.clone(),
                draft,
                self.config.request.min_busy(),
            ),
            Err(hint) => {
                ui::apply(Arc::clone(&self.state), AppAction::SetHint(hint.to_string()));
            }
        }
    }

    fn toggle_theme(&mut self) {
        let theme = self.config.ui.theme.toggled();
        ui::apply(Arc::clone(&self.state), AppAction::SetTheme(theme));

        if let Err(e) = self.config.set_theme(theme) {
            tracing::warn!("Failed to save theme: {e}");
            ui::apply(
                Arc::clone(&self.state),
                AppAction::SetHint(format!("Theme not saved: {e}")),
            );
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        // Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(body_chunks[0]);

        draw::render_header(frame, main_chunks[0], &state, self.spinner_index);
        draw::render_composer_panel(frame, left_chunks[0], &state);
        draw::render_history_panel(frame, left_chunks[1], &state);
        draw::render_response_panel(frame, body_chunks[1], &state);
        draw::render_footer(frame, main_chunks[2], &state);

        // Render modals LAST - after everything else
        if state.ui.input_mode == InputMode::ConfirmClearHistory {
            draw::render_clear_history_modal(frame, state.ui.theme, state.history.len());
        }
    }
}

mod actions;
mod app;
mod composer;
mod config;
mod editor;
mod history;
mod presenter;
mod request;
mod state;
mod status;
mod types;
mod ui;

use app::App;
use color_eyre::Result;
use config::Config;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RESTLESS_LOG";
const DEFAULT_LOG_FILTER: &str = "restless=info";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing_subscriber();

    let app = App::new()?;
    let terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableBracketedPaste) {
        tracing::warn!("Bracketed paste unavailable: {e}");
    }
    let app_result = app.run(terminal).await;
    if let Err(e) = execute!(stdout(), DisableBracketedPaste) {
        tracing::warn!("Failed to disable bracketed paste: {e}");
    }
    ratatui::restore();
    app_result
}

/// Log to a file next to the config; the terminal belongs to the UI.
/// Logging stays off if the file cannot be opened.
fn init_tracing_subscriber() {
    let Ok(log_path) = Config::log_path() else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

use crate::composer::Composer;
use crate::editor::TextEditor;
use crate::history::HistoryStore;
use crate::presenter::PresenterState;
use crate::types::{
    ComposerField, DisplayedResponse, DraftRequest, Focus, HistoryEntry, InputMode, Theme,
};
use std::time::{Duration, Instant};

/// How long a freshly prepended history row stays highlighted
pub const HISTORY_FLASH: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
pub struct AppState {
    pub composer: Composer,
    pub history: HistoryStore,

    /// Response shown in the response panel (latest send or selected entry)
    pub current_response: Option<DisplayedResponse>,
    pub presenter: PresenterState,

    /// Submissions whose busy period has not ended yet
    pub in_flight: usize,

    pub ui: UiState,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub input_mode: InputMode,

    /// Index into `Composer::fields()`
    pub selected_field: usize,

    /// Edit buffer for the single-line field being edited
    pub line_editor: TextEditor,

    pub selected_history: usize,
    pub history_flash_until: Option<Instant>,

    /// One-line message shown in the footer (validation errors, copy results)
    pub hint: Option<String>,

    pub theme: Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Composer,
            input_mode: InputMode::Normal,
            selected_field: 0,
            line_editor: TextEditor::single_line(""),
            selected_history: 0,
            history_flash_until: None,
            hint: None,
            theme: Theme::Dark,
        }
    }
}

impl AppState {
    pub fn new(history: HistoryStore, theme: Theme) -> Self {
        Self {
            composer: Composer::default(),
            history,
            current_response: None,
            presenter: PresenterState::default(),
            in_flight: 0,
            ui: UiState {
                theme,
                ..Default::default()
            },
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Claim the busy slot and snapshot the draft to send. Refused while a
    /// send is in flight or the URL is blank.
    pub fn begin_submit(&mut self) -> Result<DraftRequest, &'static str> {
        if self.is_busy() {
            return Err("A request is already in flight");
        }
        if self.composer.draft().url.trim().is_empty() {
            return Err("URL is required");
        }
        self.in_flight += 1;
        Ok(self.composer.draft().clone())
    }

    /// End a busy period started by `begin_submit`
    pub fn finish_submit(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// The composer field under the selection cursor
    pub fn selected_field(&self) -> ComposerField {
        let fields = self.composer.fields();
        fields
            .get(self.ui.selected_field.min(fields.len() - 1))
            .copied()
            .unwrap_or(ComposerField::Method)
    }

    /// Keep the field selection inside the current field list
    pub fn clamp_selected_field(&mut self) {
        let count = self.composer.fields().len();
        if self.ui.selected_field >= count {
            self.ui.selected_field = count.saturating_sub(1);
        }
    }

    /// Publish a finished send: show the response and prepend to history
    pub fn record_outcome(&mut self, response: DisplayedResponse, entry: HistoryEntry) {
        let now = Instant::now();
        self.current_response = Some(response);
        self.presenter.on_new_response(now);

        if let Err(e) = self.history.append(entry) {
            tracing::warn!("Failed to save history: {e}");
            self.ui.hint = Some(format!("History not saved: {e}"));
        }
        self.ui.selected_history = 0;
        self.ui.history_flash_until = Some(now + HISTORY_FLASH);
    }

    /// Replay a history entry into the composer and the response panel
    pub fn select_history(&mut self, idx: usize) -> bool {
        let Some((draft, response)) = self.history.select(idx) else {
            return false;
        };
        self.composer.load(draft);
        self.clamp_selected_field();
        self.current_response = Some(response);
        self.presenter.on_new_response(Instant::now());
        self.ui.selected_history = idx;
        true
    }

    pub fn clear_history(&mut self) {
        if let Err(e) = self.history.clear() {
            tracing::warn!("Failed to save cleared history: {e}");
            self.ui.hint = Some(format!("History not saved: {e}"));
        }
        self.ui.selected_history = 0;
        self.ui.history_flash_until = None;
    }

    pub fn is_history_flashing(&self, now: Instant) -> bool {
        self.ui.history_flash_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HttpMethod, RequestBody, ResponseStatus};
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(HistoryStore::in_memory(), Theme::Dark)
    }

    fn ok_response() -> DisplayedResponse {
        DisplayedResponse {
            status: ResponseStatus::Code(200),
            status_text: "OK".to_string(),
            time_ms: 3,
            size: 7,
            headers: Default::default(),
            body: json!({"a": 1}),
            raw: r#"{"a":1}"#.to_string(),
        }
    }

    #[test]
    fn test_begin_submit_claims_busy_slot_once() {
        let mut state = state();
        state.composer.set_url("https://api.test");

        let draft = state.begin_submit().unwrap();
        assert_eq!(draft.url, "https://api.test");
        assert!(state.is_busy());

        assert_eq!(state.begin_submit(), Err("A request is already in flight"));
        assert_eq!(state.in_flight, 1);

        state.finish_submit();
        assert!(!state.is_busy());
        assert!(state.begin_submit().is_ok());
    }

    #[test]
    fn test_begin_submit_requires_url() {
        let mut state = state();
        state.composer.set_url("   ");
        assert_eq!(state.begin_submit(), Err("URL is required"));
        assert!(!state.is_busy());

        state.finish_submit();
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn test_record_outcome_updates_view_and_history() {
        let mut state = state();
        state.ui.selected_history = 3;
        let draft = DraftRequest {
            url: "https://api.test".to_string(),
            ..Default::default()
        };
        let response = ok_response();
        state.record_outcome(response.clone(), HistoryEntry::new(draft.clone(), &response));

        assert_eq!(state.current_response, Some(response));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history.get(0).unwrap().request, draft);
        assert_eq!(state.ui.selected_history, 0);
        assert!(state.presenter.is_pulsing(Instant::now()));
    }

    #[test]
    fn test_select_history_replays_both_sides() {
        let mut state = state();
        let draft = DraftRequest {
            method: HttpMethod::Post,
            url: "https://api.test/items".to_string(),
            body: RequestBody::Structured(json!({"n": 1})),
            ..Default::default()
        };
        let response = ok_response();
        state.record_outcome(response.clone(), HistoryEntry::new(draft.clone(), &response));
        state.current_response = None;
        state.composer.set_url("edited");

        assert!(state.select_history(0));
        assert_eq!(state.composer.draft(), &draft);
        assert_eq!(state.current_response, Some(response));
        assert_eq!(state.history.len(), 1);
        assert!(!state.select_history(5));
    }

    #[test]
    fn test_clear_history() {
        let mut state = state();
        let response = ok_response();
        state.record_outcome(
            response.clone(),
            HistoryEntry::new(DraftRequest::default(), &response),
        );
        state.clear_history();
        assert!(state.history.is_empty());
        // Clearing history leaves the displayed response alone
        assert!(state.current_response.is_some());
    }

    #[test]
    fn test_selected_field_clamps() {
        let mut state = state();
        state.composer.set_method(HttpMethod::Post);
        state.ui.selected_field = state.composer.fields().len() - 1;
        assert_eq!(state.selected_field(), ComposerField::Body);

        state.composer.set_method(HttpMethod::Get);
        state.clamp_selected_field();
        assert_eq!(state.selected_field(), ComposerField::HeaderValue(0));
    }
}

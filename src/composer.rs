//! Request composer
//!
//! Owns the draft request and the editable representation behind it: header
//! rows (which may hold blank or duplicate keys while being typed) and the
//! multi-line body editor. Every mutation writes through to the draft so the
//! draft always reflects what is on screen.

use crate::editor::TextEditor;
use crate::types::{ComposerField, DraftRequest, HeaderMap, HttpMethod, RequestBody};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderRow {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Composer {
    draft: DraftRequest,
    rows: Vec<HeaderRow>,
    body_editor: TextEditor,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            draft: DraftRequest::default(),
            rows: vec![HeaderRow::default()],
            body_editor: TextEditor::multi_line(""),
        }
    }
}

impl Composer {
    pub fn draft(&self) -> &DraftRequest {
        &self.draft
    }

    pub fn header_rows(&self) -> &[HeaderRow] {
        &self.rows
    }

    pub fn body_editor(&self) -> &TextEditor {
        &self.body_editor
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        self.draft.method = method;
    }

    pub fn cycle_method(&mut self) {
        self.draft.method = self.draft.method.next();
    }

    pub fn set_url(&mut self, url: &str) {
        self.draft.url = url.to_string();
    }

    pub fn set_header_key(&mut self, idx: usize, key: &str) {
        if let Some(row) = self.rows.get_mut(idx) {
            row.key = key.to_string();
            self.sync_headers();
        }
    }

    pub fn set_header_value(&mut self, idx: usize, value: &str) {
        if let Some(row) = self.rows.get_mut(idx) {
            row.value = value.to_string();
            self.sync_headers();
        }
    }

    /// Appends an empty row and returns its index
    pub fn add_header_row(&mut self) -> usize {
        self.rows.push(HeaderRow::default());
        self.rows.len() - 1
    }

    /// Removes a row; the last remaining row cannot be removed
    pub fn remove_header_row(&mut self, idx: usize) -> bool {
        if self.rows.len() <= 1 || idx >= self.rows.len() {
            return false;
        }
        self.rows.remove(idx);
        self.sync_headers();
        true
    }

    /// Replace the body with typed text
    pub fn set_body_text(&mut self, text: &str) {
        self.body_editor.set_content(text);
        self.draft.body = RequestBody::from_text(text);
    }

    /// Mutable access to the body editor; the draft body is refreshed from the
    /// editor content afterwards
    pub fn edit_body<R>(&mut self, f: impl FnOnce(&mut TextEditor) -> R) -> R {
        let before = self.body_editor.content().to_string();
        let result = f(&mut self.body_editor);
        if self.body_editor.content() != before {
            self.draft.body = RequestBody::from_text(self.body_editor.content());
        }
        result
    }

    /// Pretty-print the body as JSON. A valid object or array becomes a
    /// structured body; other valid JSON stays raw text.
    pub fn format_body(&mut self) -> Result<(), String> {
        self.body_editor.format_json()?;
        self.draft.body = RequestBody::parse_text(self.body_editor.content());
        Ok(())
    }

    /// Replace the whole draft (history replay). Structured bodies stay
    /// structured so resending puts identical bytes on the wire; the editor
    /// shows them pretty-printed.
    pub fn load(&mut self, draft: DraftRequest) {
        self.rows = draft
            .headers
            .iter()
            .map(|(key, value)| HeaderRow {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        if self.rows.is_empty() {
            self.rows.push(HeaderRow::default());
        }
        self.body_editor = TextEditor::multi_line(&draft.body.display_text());
        self.draft = draft;
    }

    /// Fields in display order; the body is only offered when it will be sent
    pub fn fields(&self) -> Vec<ComposerField> {
        let mut fields = vec![ComposerField::Method, ComposerField::Url];
        for idx in 0..self.rows.len() {
            fields.push(ComposerField::HeaderKey(idx));
            fields.push(ComposerField::HeaderValue(idx));
        }
        if self.draft.method.sends_body() {
            fields.push(ComposerField::Body);
        }
        fields
    }

    /// Current text of a field
    pub fn field_text(&self, field: ComposerField) -> String {
        match field {
            ComposerField::Method => self.draft.method.to_string(),
            ComposerField::Url => self.draft.url.clone(),
            ComposerField::HeaderKey(idx) => self
                .rows
                .get(idx)
                .map(|r| r.key.clone())
                .unwrap_or_default(),
            ComposerField::HeaderValue(idx) => self
                .rows
                .get(idx)
                .map(|r| r.value.clone())
                .unwrap_or_default(),
            ComposerField::Body => self.body_editor.content().to_string(),
        }
    }

    /// Write text into a single-line field
    pub fn set_field_text(&mut self, field: ComposerField, text: &str) {
        match field {
            ComposerField::Method => {}
            ComposerField::Url => self.set_url(text),
            ComposerField::HeaderKey(idx) => self.set_header_key(idx, text),
            ComposerField::HeaderValue(idx) => self.set_header_value(idx, text),
            ComposerField::Body => self.set_body_text(text),
        }
    }

    /// Rows with an empty key are skipped; a later duplicate key wins
    fn sync_headers(&mut self) {
        self.draft.headers = self
            .rows
            .iter()
            .filter(|row| !row.key.is_empty())
            .map(|row| (row.key.clone(), row.value.clone()))
            .collect::<HeaderMap>();
    }
}

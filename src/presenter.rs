//! Response presenter
//!
//! Pure helpers that turn a `DisplayedResponse` into text for the response
//! panel, plus the small amount of view state the panel keeps: the
//! pretty/raw toggles, the arrival pulse and copy feedback.

use crate::types::{CopyTarget, DisplayedResponse, HeaderMap};
use serde_json::Value;
use std::time::{Duration, Instant};

/// How long the status line stays highlighted after a new response
pub const PULSE_DURATION: Duration = Duration::from_millis(700);

/// How long the "Copied!" marker stays visible
pub const COPIED_DURATION: Duration = Duration::from_millis(1200);

/// Whether the body section should be shown at all
pub fn has_body(body: &Value) -> bool {
    match body {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Headers as pretty JSON object text (raw view and clipboard)
pub fn headers_raw_text(headers: &HeaderMap) -> String {
    serde_json::to_string_pretty(headers).unwrap_or_default()
}

/// Field-by-field header lines
pub fn headers_pretty_lines(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Pretty body: one `key: value` line per field for objects, indented JSON
/// for arrays, and the plain text of anything else
pub fn body_pretty_lines(body: &Value) -> Vec<String> {
    match body {
        Value::Object(map) => map.iter().map(|(k, v)| format!("{k}: {v}")).collect(),
        Value::Array(_) => serde_json::to_string_pretty(body)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect(),
        Value::String(s) => s.lines().map(str::to_string).collect(),
        other => vec![other.to_string()],
    }
}

/// Verbatim body lines
pub fn body_raw_lines(raw: &str) -> Vec<String> {
    raw.lines().map(str::to_string).collect()
}

/// Text placed on the clipboard for a copy action
pub fn copy_text(response: &DisplayedResponse, target: CopyTarget) -> String {
    match target {
        CopyTarget::Headers => headers_raw_text(&response.headers),
        CopyTarget::Body => response.raw.clone(),
    }
}

/// Human-readable body size
pub fn format_size(size: usize) -> String {
    if size < 1024 {
        format!("{size} B")
    } else {
        format!("{:.1} KB", size as f64 / 1024.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PresenterState {
    pub raw_headers: bool,
    pub raw_body: bool,

    /// Scroll offset for the whole response panel (lines)
    pub scroll: u16,

    pulse_until: Option<Instant>,
    copied: Option<(CopyTarget, Instant)>,
}

impl PresenterState {
    pub fn toggle_raw_headers(&mut self) {
        self.raw_headers = !self.raw_headers;
    }

    pub fn toggle_raw_body(&mut self) {
        self.raw_body = !self.raw_body;
    }

    /// A new response object arrived (send completed or history selected)
    pub fn on_new_response(&mut self, now: Instant) {
        self.pulse_until = Some(now + PULSE_DURATION);
        self.scroll = 0;
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }

    pub fn mark_copied(&mut self, target: CopyTarget, now: Instant) {
        self.copied = Some((target, now + COPIED_DURATION));
    }

    pub fn recently_copied(&self, target: CopyTarget, now: Instant) -> bool {
        matches!(self.copied, Some((t, until)) if t == target && now < until)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseStatus;
    use serde_json::json;

    #[test]
    fn test_has_body() {
        assert!(!has_body(&json!(null)));
        assert!(!has_body(&json!("")));
        assert!(!has_body(&json!("  ")));
        assert!(!has_body(&json!([])));
        assert!(!has_body(&json!({})));
        assert!(has_body(&json!(0)));
        assert!(has_body(&json!(false)));
        assert!(has_body(&json!("x")));
        assert!(has_body(&json!([0])));
        assert!(has_body(&json!({"a": null})));
    }

    #[test]
    fn test_headers_raw_text_is_pretty_json() {
        let headers = HeaderMap::from([
            ("content-type".to_string(), "application/json".to_string()),
            ("x-id".to_string(), "7".to_string()),
        ]);
        assert_eq!(
            headers_raw_text(&headers),
            "{\n  \"content-type\": \"application/json\",\n  \"x-id\": \"7\"\n}"
        );
        assert_eq!(headers_raw_text(&HeaderMap::new()), "{}");
    }

    #[test]
    fn test_body_pretty_lines() {
        assert_eq!(
            body_pretty_lines(&json!({"a": 1, "b": {"c": "d"}})),
            vec!["a: 1".to_string(), r#"b: {"c":"d"}"#.to_string()]
        );
        assert_eq!(body_pretty_lines(&json!("plain\ntext")), vec!["plain", "text"]);
        assert_eq!(body_pretty_lines(&json!(42)), vec!["42"]);
        assert_eq!(body_pretty_lines(&json!([1])), vec!["[", "  1", "]"]);
    }

    #[test]
    fn test_copy_text() {
        let response = DisplayedResponse {
            status: ResponseStatus::Code(200),
            status_text: "OK".to_string(),
            time_ms: 1,
            size: 7,
            headers: HeaderMap::from([("a".to_string(), "b".to_string())]),
            body: json!({"a": 1}),
            raw: r#"{"a":1}"#.to_string(),
        };
        assert_eq!(copy_text(&response, CopyTarget::Body), r#"{"a":1}"#);
        assert_eq!(
            copy_text(&response, CopyTarget::Headers),
            "{\n  \"a\": \"b\"\n}"
        );
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut view = PresenterState::default();
        view.toggle_raw_body();
        assert!(view.raw_body);
        assert!(!view.raw_headers);
        view.toggle_raw_headers();
        view.toggle_raw_body();
        assert!(view.raw_headers);
        assert!(!view.raw_body);
    }

    #[test]
    fn test_pulse_expires() {
        let mut view = PresenterState::default();
        let now = Instant::now();
        assert!(!view.is_pulsing(now));

        view.scroll = 12;
        view.on_new_response(now);
        assert!(view.is_pulsing(now));
        assert_eq!(view.scroll, 0);
        assert!(!view.is_pulsing(now + PULSE_DURATION));
    }

    #[test]
    fn test_copied_marker_per_target() {
        let mut view = PresenterState::default();
        let now = Instant::now();
        view.mark_copied(CopyTarget::Body, now);
        assert!(view.recently_copied(CopyTarget::Body, now));
        assert!(!view.recently_copied(CopyTarget::Headers, now));
        assert!(!view.recently_copied(CopyTarget::Body, now + COPIED_DURATION));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}

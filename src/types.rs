use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Header mapping shared by drafts and responses (sorted for stable rendering)
pub type HeaderMap = BTreeMap<String, String>;

/// HTTP methods the composer can send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Next method in selector order, wrapping back to GET
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Every method except GET carries the draft body
    pub fn sends_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body as entered in the composer.
///
/// Persisted as plain JSON: an empty string for `Empty`, a JSON string for
/// `Raw`, and the value itself for `Structured`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RequestBody {
    #[default]
    Empty,
    Raw(String),
    Structured(Value),
}

impl RequestBody {
    /// Body from editor text; only the empty string counts as no body
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            RequestBody::Empty
        } else {
            RequestBody::Raw(text.to_string())
        }
    }

    /// Attempts to read text as a JSON object or array, falling back to raw text
    pub fn parse_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => RequestBody::Structured(value),
            _ => Self::from_text(text),
        }
    }

    /// Text put on the wire, `None` when there is nothing to send
    pub fn wire_text(&self) -> Option<String> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Raw(text) => Some(text.clone()),
            RequestBody::Structured(value) => Some(value.to_string()),
        }
    }

    /// Text shown in the body editor (structured values pretty-printed)
    pub fn display_text(&self) -> String {
        match self {
            RequestBody::Empty => String::new(),
            RequestBody::Raw(text) => text.clone(),
            RequestBody::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RequestBody::Empty,
            Value::String(text) => RequestBody::from_text(&text),
            other => RequestBody::Structured(other),
        }
    }
}

impl From<RequestBody> for Value {
    fn from(body: RequestBody) -> Self {
        match body {
            RequestBody::Empty => Value::String(String::new()),
            RequestBody::Raw(text) => Value::String(text),
            RequestBody::Structured(value) => value,
        }
    }
}

/// The editable request owned by the composer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: HeaderMap,
    #[serde(default)]
    pub body: RequestBody,
}

/// Outcome status: an HTTP status code or the `"Error"` sentinel for
/// requests that never produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Code(u16),
    Error,
}

pub const ERROR_STATUS: &str = "Error";

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Code(code) => write!(f, "{code}"),
            ResponseStatus::Error => f.write_str(ERROR_STATUS),
        }
    }
}

impl ResponseStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, ResponseStatus::Error)
    }

    /// Reads a stored status: a number, a numeric string, or the error sentinel
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .map(ResponseStatus::Code)
                .ok_or_else(|| format!("status code out of range: {n}")),
            Value::String(s) if s == ERROR_STATUS => Ok(ResponseStatus::Error),
            Value::String(s) => s
                .trim()
                .parse::<u16>()
                .map(ResponseStatus::Code)
                .map_err(|_| format!("unrecognized status: {s}")),
            other => Err(format!("unrecognized status: {other}")),
        }
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseStatus::Code(code) => serializer.serialize_u16(*code),
            ResponseStatus::Error => serializer.serialize_str(ERROR_STATUS),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ResponseStatus::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// The response currently shown in the response panel
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedResponse {
    pub status: ResponseStatus,
    /// Reason phrase, or the failure description for `ResponseStatus::Error`
    pub status_text: String,
    pub time_ms: u64,
    pub size: usize,
    pub headers: HeaderMap,
    /// Parsed JSON when the body was valid JSON, otherwise the text as a string
    pub body: Value,
    pub raw: String,
}

impl DisplayedResponse {
    /// Error-shaped response for a request that never completed
    pub fn error(message: String) -> Self {
        Self {
            status: ResponseStatus::Error,
            status_text: message,
            time_ms: 0,
            size: 0,
            headers: HeaderMap::new(),
            body: Value::String(String::new()),
            raw: String::new(),
        }
    }
}

/// One past send attempt and its outcome; never modified after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub request: DraftRequest,
    pub status: ResponseStatus,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub response_headers: HeaderMap,
    #[serde(default)]
    pub response_body: Value,
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub time: u64,
    #[serde(default)]
    pub size: usize,
}

impl HistoryEntry {
    pub fn new(request: DraftRequest, response: &DisplayedResponse) -> Self {
        Self {
            request,
            status: response.status,
            status_text: response.status_text.clone(),
            response_headers: response.headers.clone(),
            response_body: response.body.clone(),
            raw: response.raw.clone(),
            time: response.time_ms,
            size: response.size,
        }
    }

    /// Rebuilds the response view recorded in this entry
    pub fn to_displayed(&self) -> DisplayedResponse {
        DisplayedResponse {
            status: self.status,
            status_text: self.status_text.clone(),
            time_ms: self.time,
            size: self.size,
            headers: self.response_headers.clone(),
            body: self.response_body.clone(),
            raw: self.raw.clone(),
        }
    }
}

/// Which panel has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Composer,
    History,
    Response,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Composer => Focus::History,
            Focus::History => Focus::Response,
            Focus::Response => Focus::Composer,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Composer => Focus::Response,
            Focus::History => Focus::Composer,
            Focus::Response => Focus::History,
        }
    }
}

/// An editable field in the composer panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerField {
    Method,
    Url,
    HeaderKey(usize),
    HeaderValue(usize),
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the selected composer field
    Editing(ComposerField),
    ConfirmClearHistory,
}

/// Color theme, persisted in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Which part of the response a copy action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Headers,
    Body,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_cycle_wraps() {
        let mut method = HttpMethod::Get;
        let mut seen = vec![method];
        for _ in 0..5 {
            method = method.next();
            seen.push(method);
        }
        assert_eq!(
            seen,
            vec![
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Delete,
                HttpMethod::Patch,
                HttpMethod::Get,
            ]
        );
    }

    #[test]
    fn test_only_get_drops_body() {
        assert!(!HttpMethod::Get.sends_body());
        assert!(HttpMethod::Post.sends_body());
        assert!(HttpMethod::Delete.sends_body());
    }

    #[test]
    fn test_request_body_from_text() {
        assert_eq!(RequestBody::from_text(""), RequestBody::Empty);
        assert_eq!(
            RequestBody::from_text("  "),
            RequestBody::Raw("  ".to_string())
        );
    }

    #[test]
    fn test_request_body_parse_text() {
        assert_eq!(
            RequestBody::parse_text(r#"{"a": 1}"#),
            RequestBody::Structured(json!({"a": 1}))
        );
        assert_eq!(
            RequestBody::parse_text("[1, 2]"),
            RequestBody::Structured(json!([1, 2]))
        );
        // Scalars stay as the text the user typed
        assert_eq!(RequestBody::parse_text("42"), RequestBody::Raw("42".to_string()));
        assert_eq!(
            RequestBody::parse_text("{broken"),
            RequestBody::Raw("{broken".to_string())
        );
    }

    #[test]
    fn test_request_body_wire_and_display_text() {
        let body = RequestBody::Structured(json!({"name": "x"}));
        assert_eq!(body.wire_text().unwrap(), r#"{"name":"x"}"#);
        assert_eq!(body.display_text(), "{\n  \"name\": \"x\"\n}");
        assert_eq!(RequestBody::Empty.wire_text(), None);
    }

    #[test]
    fn test_request_body_serde_shape() {
        assert_eq!(serde_json::to_value(RequestBody::Empty).unwrap(), json!(""));
        assert_eq!(
            serde_json::to_value(RequestBody::Raw("hi".into())).unwrap(),
            json!("hi")
        );
        let body: RequestBody = serde_json::from_value(json!({"k": true})).unwrap();
        assert_eq!(body, RequestBody::Structured(json!({"k": true})));
        let body: RequestBody = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(body, RequestBody::Empty);
    }

    #[test]
    fn test_status_serde_shape() {
        assert_eq!(
            serde_json::to_value(ResponseStatus::Code(404)).unwrap(),
            json!(404)
        );
        assert_eq!(
            serde_json::to_value(ResponseStatus::Error).unwrap(),
            json!("Error")
        );
        let status: ResponseStatus = serde_json::from_value(json!("201")).unwrap();
        assert_eq!(status, ResponseStatus::Code(201));
        assert!(serde_json::from_value::<ResponseStatus>(json!("teapot")).is_err());
        assert!(serde_json::from_value::<ResponseStatus>(json!(70000)).is_err());
    }

    #[test]
    fn test_error_response_is_zeroed() {
        let response = DisplayedResponse::error("connection refused".to_string());
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.status_text, "connection refused");
        assert_eq!(response.time_ms, 0);
        assert_eq!(response.size, 0);
        assert!(response.headers.is_empty());
        assert!(response.raw.is_empty());
    }

    #[test]
    fn test_history_entry_projects_back_to_response() {
        let response = DisplayedResponse {
            status: ResponseStatus::Code(200),
            status_text: "OK".to_string(),
            time_ms: 12,
            size: 7,
            headers: HeaderMap::from([("content-type".into(), "application/json".into())]),
            body: json!({"a": 1}),
            raw: r#"{"a":1}"#.to_string(),
        };
        let entry = HistoryEntry::new(DraftRequest::default(), &response);
        assert_eq!(entry.to_displayed(), response);
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Composer.next(), Focus::History);
        assert_eq!(Focus::Response.next(), Focus::Composer);
        assert_eq!(Focus::Composer.prev(), Focus::Response);
    }
}

//! Sending a draft over the network
//!
//! `send` never fails: transport problems come back as an error-shaped
//! response so the caller can show them and log them to history like any
//! other outcome.

use crate::config::RequestSettings;
use crate::state::AppState;
use crate::types::{DisplayedResponse, DraftRequest, HeaderMap, HistoryEntry, ResponseStatus};
use reqwest::Client;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use url::Url;

/// Result of one send attempt: what to display and what to log
#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    pub response: DisplayedResponse,
    pub entry: HistoryEntry,
}

impl SendOutcome {
    fn new(draft: DraftRequest, response: DisplayedResponse) -> Self {
        let entry = HistoryEntry::new(draft, &response);
        Self { response, entry }
    }
}

pub fn build_client(settings: &RequestSettings) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = settings.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Issue exactly one request for `draft`
pub async fn send(client: &Client, draft: &DraftRequest) -> SendOutcome {
    let url = match Url::parse(draft.url.trim()) {
        Ok(url) => url,
        Err(e) => {
            tracing::info!("Rejected URL {:?}: {e}", draft.url);
            return SendOutcome::new(
                draft.clone(),
                DisplayedResponse::error(format!("Invalid URL: {e}")),
            );
        }
    };

    let mut request_builder = client.request(draft.method.to_reqwest(), url);
    for (key, value) in &draft.headers {
        request_builder = request_builder.header(key.as_str(), value.as_str());
    }
    if draft.method.sends_body() {
        if let Some(body) = draft.body.wire_text() {
            request_builder = request_builder.body(body);
        }
    }

    tracing::info!("{} {}", draft.method, draft.url);

    // Timing covers dispatch through the end of the body read
    let start = Instant::now();

    let response = match request_builder.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Request to {} failed: {e}", draft.url);
            return SendOutcome::new(draft.clone(), DisplayedResponse::error(e.to_string()));
        }
    };

    let status = response.status();
    let headers = collect_headers(response.headers());

    let raw = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Reading response from {} failed: {e}", draft.url);
            return SendOutcome::new(
                draft.clone(),
                DisplayedResponse::error(format!("Failed to read response body: {e}")),
            );
        }
    };
    let time_ms = start.elapsed().as_millis() as u64;

    let body = serde_json::from_str::<Value>(&raw).unwrap_or_else(|_| Value::String(raw.clone()));

    tracing::info!("{} {} -> {} in {time_ms}ms", draft.method, draft.url, status.as_u16());

    let displayed = DisplayedResponse {
        status: ResponseStatus::Code(status.as_u16()),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        time_ms,
        size: raw.chars().count(),
        headers,
        body,
        raw,
    };
    SendOutcome::new(draft.clone(), displayed)
}

/// Repeated header names are joined with ", "
fn collect_headers(headers: &reqwest::header::HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (key, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(key.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}

/// Send a draft claimed with `AppState::begin_submit` and publish the outcome
/// to the shared state. The busy count stays raised for at least `min_busy`.
pub async fn submit(
    state: Arc<RwLock<AppState>>,
    client: Client,
    draft: DraftRequest,
    min_busy: Duration,
) {
    let started = Instant::now();
    let outcome = send(&client, &draft).await;

    if let Ok(mut s) = state.write() {
        s.record_outcome(outcome.response, outcome.entry);
    }

    let elapsed = started.elapsed();
    if elapsed < min_busy {
        tokio::time::sleep(min_busy - elapsed).await;
    }

    if let Ok(mut s) = state.write() {
        s.finish_submit();
    }
}

/// Spawn `submit` without waiting for it
pub fn submit_background(
    state: Arc<RwLock<AppState>>,
    client: Client,
    draft: DraftRequest,
    min_busy: Duration,
) {
    tokio::spawn(submit(state, client, draft, min_busy));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::types::{HttpMethod, RequestBody, Theme};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn draft(method: HttpMethod, url: String) -> DraftRequest {
        DraftRequest {
            method,
            url,
            ..Default::default()
        }
    }

    fn shared_state() -> Arc<RwLock<AppState>> {
        Arc::new(RwLock::new(AppState::new(
            HistoryStore::in_memory(),
            Theme::Dark,
        )))
    }

    fn begin(state: &Arc<RwLock<AppState>>) -> DraftRequest {
        state.write().unwrap().begin_submit().unwrap()
    }

    #[tokio::test]
    async fn test_json_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"a":1}"#)
                    .insert_header("x-served-by", "mock"),
            )
            .mount(&server)
            .await;

        let request = draft(HttpMethod::Get, format!("{}/a", server.uri()));
        let outcome = send(&Client::new(), &request).await;

        assert_eq!(outcome.response.status, ResponseStatus::Code(200));
        assert_eq!(outcome.response.status_text, "OK");
        assert_eq!(outcome.response.body, json!({"a": 1}));
        assert_eq!(outcome.response.raw, r#"{"a":1}"#);
        assert_eq!(outcome.response.size, 7);
        assert_eq!(outcome.response.headers["x-served-by"], "mock");
        assert_eq!(outcome.entry.request, request);
        assert_eq!(outcome.entry.status, ResponseStatus::Code(200));
    }

    #[tokio::test]
    async fn test_non_json_body_kept_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let outcome = send(&Client::new(), &draft(HttpMethod::Get, server.uri())).await;

        assert_eq!(outcome.response.status, ResponseStatus::Code(404));
        assert_eq!(outcome.response.body, Value::String("not found".into()));
        assert_eq!(outcome.response.raw, "not found");
        assert_eq!(outcome.response.size, 9);
    }

    #[tokio::test]
    async fn test_size_counts_characters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("héllo"))
            .mount(&server)
            .await;

        let outcome = send(&Client::new(), &draft(HttpMethod::Get, server.uri())).await;
        assert_eq!(outcome.response.size, 5);
    }

    #[tokio::test]
    async fn test_body_and_headers_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(header("x-trace", "abc"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let mut request = draft(HttpMethod::Post, format!("{}/items", server.uri()));
        request.headers.insert("x-trace".into(), "abc".into());
        request.body = RequestBody::Structured(json!({"name": "x"}));

        let outcome = send(&Client::new(), &request).await;
        assert_eq!(outcome.response.status, ResponseStatus::Code(201));
        assert_eq!(outcome.response.body, Value::String(String::new()));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].body, br#"{"name":"x"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_get_never_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut request = draft(HttpMethod::Get, server.uri());
        request.body = RequestBody::Raw("ignored".into());
        send(&Client::new(), &request).await;

        let received = server.received_requests().await.unwrap();
        assert!(received[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_raw_body_sent_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let mut request = draft(HttpMethod::Put, server.uri());
        request.body = RequestBody::Raw("{ \"spaced\" : true }".into());
        send(&Client::new(), &request).await;

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].body, b"{ \"spaced\" : true }".to_vec());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error_outcome() {
        let request = draft(HttpMethod::Get, "http://127.0.0.1:1/".to_string());
        let outcome = send(&Client::new(), &request).await;

        assert_eq!(outcome.response.status, ResponseStatus::Error);
        assert!(!outcome.response.status_text.is_empty());
        assert_eq!(outcome.response.size, 0);
        assert_eq!(outcome.response.time_ms, 0);
        assert_eq!(outcome.entry.status, ResponseStatus::Error);
        assert_eq!(outcome.entry.request, request);
    }

    #[tokio::test]
    async fn test_invalid_url_is_error_outcome() {
        let outcome = send(&Client::new(), &draft(HttpMethod::Get, "not a url".into())).await;
        assert_eq!(outcome.response.status, ResponseStatus::Error);
        assert!(outcome.response.status_text.starts_with("Invalid URL"));
    }

    #[tokio::test]
    async fn test_submit_records_one_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"a":1}"#))
            .mount(&server)
            .await;

        let state = shared_state();
        state.write().unwrap().composer.set_url(&server.uri());
        let snapshot = state.read().unwrap().composer.draft().clone();

        let draft = begin(&state);
        assert!(state.read().unwrap().is_busy());
        submit(Arc::clone(&state), Client::new(), draft, Duration::ZERO).await;

        let s = state.read().unwrap();
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history.get(0).unwrap().request, snapshot);
        assert_eq!(
            s.current_response.as_ref().map(|r| r.status),
            Some(ResponseStatus::Code(200))
        );
        assert!(!s.is_busy());
    }

    #[tokio::test]
    async fn test_submit_failure_still_logged() {
        let state = shared_state();
        state.write().unwrap().composer.set_url("http://127.0.0.1:1/");

        submit(Arc::clone(&state), Client::new(), begin(&state), Duration::ZERO).await;

        let s = state.read().unwrap();
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history.get(0).unwrap().status, ResponseStatus::Error);
    }

    #[tokio::test]
    async fn test_busy_floor_holds() {
        let state = shared_state();
        state.write().unwrap().composer.set_url("not a url");

        let started = Instant::now();
        submit(Arc::clone(&state), Client::new(), begin(&state), Duration::from_millis(50)).await;

        assert!(started.elapsed() >= Duration::from_millis(50));
        assert!(!state.read().unwrap().is_busy());
    }

    #[tokio::test]
    async fn test_select_then_submit_resends_same_request() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let state = shared_state();
        {
            let mut s = state.write().unwrap();
            s.composer.set_method(HttpMethod::Patch);
            s.composer.set_url(&format!("{}/things/1", server.uri()));
            s.composer.set_header_key(0, "X-Token");
            s.composer.set_header_value(0, "secret");
            s.composer.set_body_text("[1, 2]");
            s.composer.format_body().unwrap();
        }
        submit(Arc::clone(&state), Client::new(), begin(&state), Duration::ZERO).await;

        {
            let mut s = state.write().unwrap();
            s.composer.set_url("http://elsewhere.invalid");
            assert!(s.select_history(0));
        }
        submit(Arc::clone(&state), Client::new(), begin(&state), Duration::ZERO).await;

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].url, received[1].url);
        assert_eq!(received[0].body, received[1].body);
        assert_eq!(received[0].body, b"[1,2]".to_vec());
        assert_eq!(
            received[1].headers.get("x-token").unwrap().to_str().unwrap(),
            "secret"
        );
        assert_eq!(state.read().unwrap().history.len(), 2);
    }
}

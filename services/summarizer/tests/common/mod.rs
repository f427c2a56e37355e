#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

use summarizer::{create_app, AppState, Summarizer, UpstreamConfig};

pub const TEST_API_KEY: &str = "gsk_test_key";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: JsonValue,
}

impl RecordedRequest {
    pub fn message(&self, index: usize) -> (&str, &str) {
        let message = &self.body["messages"][index];
        (
            message["role"].as_str().unwrap_or_default(),
            message["content"].as_str().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone)]
pub enum MockBody {
    /// Replies with a completion whose content is `Summary: <user message>`.
    Echo,
    Json(JsonValue),
    Raw(String),
}

#[derive(Debug, Clone)]
struct MockResponse {
    status: StatusCode,
    body: MockBody,
    delay: Duration,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: Arc<Mutex<MockResponse>>,
}

/// In-process stand-in for the chat-completion API.
pub struct MockUpstream {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: Arc<Mutex<MockResponse>>,
    _server_handle: tokio::task::JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start() -> anyhow::Result<Self> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let response = Arc::new(Mutex::new(MockResponse {
            status: StatusCode::OK,
            body: MockBody::Echo,
            delay: Duration::ZERO,
        }));

        let state = MockState {
            requests: requests.clone(),
            response: response.clone(),
        };

        let app = Router::new()
            .route("/openai/v1/chat/completions", post(handle_completion))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(50)).await;

        Ok(Self {
            url: format!("http://127.0.0.1:{}/openai/v1/chat/completions", port),
            requests,
            response,
            _server_handle: server_handle,
        })
    }

    pub fn set_response(&self, status: StatusCode, body: MockBody) {
        let mut response = self.response.lock().unwrap();
        response.status = status;
        response.body = body;
    }

    pub fn set_delay(&self, delay: Duration) {
        self.response.lock().unwrap().delay = delay;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn upstream_config(&self, timeout: Duration) -> UpstreamConfig {
        UpstreamConfig {
            url: self.url.clone(),
            api_key: TEST_API_KEY.to_string(),
            timeout,
        }
    }
}

async fn handle_completion(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.clone(),
    });

    let MockResponse {
        status,
        body: reply,
        delay,
    } = state.response.lock().unwrap().clone();

    if !delay.is_zero() {
        sleep(delay).await;
    }

    let payload = match reply {
        MockBody::Echo => {
            let user_text = body["messages"][1]["content"].as_str().unwrap_or_default();
            completion_body(&format!("Summary: {}", user_text)).to_string()
        }
        MockBody::Json(value) => value.to_string(),
        MockBody::Raw(text) => text,
    };

    (status, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

/// A well-formed chat-completion reply carrying `content`.
pub fn completion_body(content: &str) -> JsonValue {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

pub async fn setup_test_app(timeout: Duration) -> anyhow::Result<(MockUpstream, axum::Router)> {
    let upstream = MockUpstream::start().await?;
    let summarizer = Summarizer::new(upstream.upstream_config(timeout))?;
    let app = create_app(AppState { summarizer });

    Ok((upstream, app))
}

#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// This module provides a stub Learn-Ease backend:
/// - An axum server on an ephemeral local port
/// - Canned responses keyed by method and path
/// - A log of every request it received (method, path, headers, body)
/// - Client construction with or without a stored token

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use learnease_client::client::ApiClient;
use learnease_client::config::ClientConfig;
use learnease_shared::auth::session::{MemorySessionStore, Session, SessionStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// A request as received by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
struct StubResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

#[derive(Debug, Default)]
struct StubState {
    routes: HashMap<(String, String), StubResponse>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<StubState>>;

/// Stub backend running for the duration of a test
pub struct StubBackend {
    pub base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl StubBackend {
    /// Starts the stub on 127.0.0.1 with a random port
    pub async fn start() -> anyhow::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(StubState::default()));
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        })
    }

    /// Answers `method path` with a JSON body
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.insert(method, path, StubResponse {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        });
    }

    /// Answers `method path` with raw bytes
    pub fn on_bytes(&self, method: &str, path: &str, status: u16, content_type: &'static str, body: &[u8]) {
        self.insert(method, path, StubResponse {
            status,
            content_type,
            body: body.to_vec(),
        });
    }

    /// Answers `method path` with an empty body (e.g. 204)
    pub fn on_empty(&self, method: &str, path: &str, status: u16) {
        self.on_bytes(method, path, status, "text/plain", b"");
    }

    fn insert(&self, method: &str, path: &str, response: StubResponse) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method.to_uppercase(), path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// The only request received for `method path`
    pub fn request(&self, method: &str, path: &str) -> RecordedRequest {
        let matching: Vec<_> = self
            .requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect();
        assert_eq!(matching.len(), 1, "expected one {} {}, got {:?}", method, path, matching);
        matching.into_iter().next().unwrap()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, 5, "unused-session.json").unwrap()
    }

    /// Client with an in-memory session, optionally holding a token
    pub async fn client(&self, token: Option<&str>) -> ApiClient {
        let store: Arc<dyn SessionStore> = match token {
            Some(token) => Arc::new(MemorySessionStore::with_token(token)),
            None => Arc::new(MemorySessionStore::new()),
        };
        let session = Session::init(store).await.unwrap();
        ApiClient::new(self.config(), Arc::new(session)).unwrap()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.to_vec(),
    };

    let mut state = state.lock().unwrap();
    let response = state
        .routes
        .get(&(recorded.method.clone(), recorded.path.clone()))
        .cloned();
    state.requests.push(recorded);
    drop(state);

    match response {
        Some(stub) => (
            StatusCode::from_u16(stub.status).unwrap(),
            [(header::CONTENT_TYPE, stub.content_type)],
            stub.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({"detail": "Not Found"}).to_string(),
        )
            .into_response(),
    }
}

/// Fixtures shaped like backend responses
pub mod fixtures {
    use serde_json::{json, Value};

    pub fn user() -> Value {
        json!({
            "id": "u1",
            "firstname": "Ada",
            "lastname": "Lovelace",
            "email": "ada@example.com",
            "age": 21,
            "university_name": "UCL",
            "image": null,
            "verified": true
        })
    }

    pub fn book(id: &str, title: &str, category_id: Option<&str>) -> Value {
        json!({
            "id": id,
            "title": title,
            "filename": format!("{}.pdf", id),
            "upload_date": "2024-05-01T10:00:00.123456",
            "category_id": category_id
        })
    }

    pub fn category(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "user_id": "u1",
            "created_at": "2024-04-01T09:00:00"
        })
    }

    /// Minimal two-page PDF body
    pub const TWO_PAGE_PDF: &[u8] = b"%PDF-1.4\n\
        1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
        2 0 obj << /Type /Pages /Kids [3 0 R 4 0 R] /Count 2 >> endobj\n\
        3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
        4 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
        %%EOF";
}

//! fake-dealer-api: a scriptable stand-in for the dealership backend.
//!
//! Binds an axum server to `127.0.0.1:0`, answers each `(method, path)` with
//! a canned reply and records every request it receives so tests can assert
//! on headers, bodies and call order.

pub mod fixtures;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// A request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    /// Parsed JSON body; `None` for empty or non-JSON (multipart) bodies.
    pub body: Option<Value>,
    pub raw_len: usize,
}

impl RecordedRequest {
    /// `"PATCH /api/sales/leads/3/"`
    pub fn call(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: Value,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<(String, String), Reply>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<Inner>>;

pub struct FakeApi {
    addr: SocketAddr,
    inner: Shared,
    server: JoinHandle<()>,
}

impl FakeApi {
    pub async fn start() -> Self {
        let inner: Shared = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new().fallback(handle).with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api listener");
        let addr = listener.local_addr().expect("fake api local addr");

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::warn!(error = %e, "fake api stopped");
            }
        });

        Self { addr, inner, server }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Script the reply for `method path`. Later calls replace earlier ones.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        let path = normalize(path);
        self.lock()
            .routes
            .insert((method.to_uppercase(), path), Reply { status, body });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Every call received so far, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().requests.iter().map(RecordedRequest::call).collect()
    }

    /// The last request made to `method path`, if any.
    pub fn last(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        let path = normalize(path);
        let method = method.to_uppercase();
        self.lock()
            .requests
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

async fn handle(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).ok(),
        raw_len: body.len(),
    };

    let reply = {
        let mut guard = inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let key = (recorded.method.clone(), recorded.path.clone());
        guard.requests.push(recorded);
        guard.routes.get(&key).cloned()
    };

    match reply {
        Some(Reply { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status == StatusCode::NO_CONTENT {
                status.into_response()
            } else {
                (status, Json(body)).into_response()
            }
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response(),
    }
}

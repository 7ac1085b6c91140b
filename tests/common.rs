// ABOUTME: Shared test utilities for collector integration tests
// ABOUTME: In-process axum mock of the LibreLinkUp backend with per-route call counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `librelinkup_collector`
//!
//! The mock backend issues a fresh token on every successful login and
//! answers authenticated calls carrying any other token with `400`, like the
//! real service does for an expired session.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use librelinkup_collector::config::{CollectorConfig, HttpClientConfig};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const SESSION_JSON: &str = include_str!("testdata/session.json");
pub const CONNECTIONS_JSON: &str = include_str!("testdata/connections.json");
pub const MEASUREMENTS_JSON: &str = include_str!("testdata/measurements.json");

pub const PATIENT_ID: &str = "639dac0c-7065-4488-a782-ef81905213f3";
pub const SENSOR_SN: &str = "123ABCD456";
pub const EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "correct-horse";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Scripted behavior and recorded traffic of the mock backend
#[derive(Default)]
pub struct MockState {
    pub login_calls: AtomicUsize,
    pub connections_calls: AtomicUsize,
    pub graph_calls: AtomicUsize,
    issued_tokens: AtomicUsize,
    current_token: Mutex<Option<String>>,
    login_statuses: Mutex<VecDeque<i32>>,
    login_http_statuses: Mutex<VecDeque<StatusCode>>,
    connections_statuses: Mutex<VecDeque<StatusCode>>,
    graph_statuses: Mutex<VecDeque<StatusCode>>,
    connections_body: Mutex<Option<Value>>,
    graph_delay: Mutex<Option<Duration>>,
    headers: Mutex<HashMap<&'static str, HeaderMap>>,
    login_bodies: Mutex<Vec<Value>>,
}

impl MockState {
    /// Queue `status` values for the next login bodies; 0 once the queue is empty
    pub fn push_login_status(&self, status: i32) {
        self.login_statuses.lock().unwrap().push_back(status);
    }

    /// Queue an HTTP status for the next login response
    pub fn push_login_http_status(&self, status: StatusCode) {
        self.login_http_statuses.lock().unwrap().push_back(status);
    }

    /// Force the next connections responses to these HTTP statuses
    pub fn push_connections_status(&self, status: StatusCode) {
        self.connections_statuses.lock().unwrap().push_back(status);
    }

    /// Force the next graph responses to these HTTP statuses
    pub fn push_graph_status(&self, status: StatusCode) {
        self.graph_statuses.lock().unwrap().push_back(status);
    }

    /// Replace the connections fixture
    pub fn set_connections_body(&self, body: Value) {
        *self.connections_body.lock().unwrap() = Some(body);
    }

    /// Delay graph responses before any header is sent
    pub fn set_graph_delay(&self, delay: Duration) {
        *self.graph_delay.lock().unwrap() = Some(delay);
    }

    /// Invalidate the current session as if it expired server-side
    pub fn expire_session(&self) {
        *self.current_token.lock().unwrap() = None;
    }

    /// Token handed out by the most recent successful login
    pub fn current_token(&self) -> Option<String> {
        self.current_token.lock().unwrap().clone()
    }

    /// Headers of the most recent request to `route` ("login", "connections", "graph")
    pub fn last_headers(&self, route: &str) -> Option<HeaderMap> {
        self.headers.lock().unwrap().get(route).cloned()
    }

    /// Every login body received, in order
    pub fn login_bodies(&self) -> Vec<Value> {
        self.login_bodies.lock().unwrap().clone()
    }

    pub fn logins(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn connections(&self) -> usize {
        self.connections_calls.load(Ordering::SeqCst)
    }

    pub fn graphs(&self) -> usize {
        self.graph_calls.load(Ordering::SeqCst)
    }

    fn record(&self, route: &'static str, headers: &HeaderMap) {
        self.headers.lock().unwrap().insert(route, headers.clone());
    }

    /// Scripted status if queued, otherwise 400 unless the bearer token is current
    fn authorize(&self, queue: &Mutex<VecDeque<StatusCode>>, headers: &HeaderMap) -> StatusCode {
        if let Some(status) = queue.lock().unwrap().pop_front() {
            return status;
        }
        let expected = self
            .current_token
            .lock()
            .unwrap()
            .as_ref()
            .map(|token| format!("Bearer {token}"));
        let presented = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        if expected.is_some() && presented == expected {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

/// Running mock backend; aborted on drop
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    /// Serve the mock on an ephemeral port
    pub async fn start() -> Self {
        init_test_logging();
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/llu/auth/login", post(login))
            .route("/llu/connections", get(connections))
            .route("/llu/connections/:patient_id/graph", get(graph))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Collector configuration pointing at this mock
    pub fn config(&self) -> CollectorConfig {
        CollectorConfig::new(EMAIL, PASSWORD, "EU")
            .with_api_url(self.base_url.clone())
            .with_http(HttpClientConfig {
                response_header_timeout_secs: 2,
                request_timeout_secs: 3,
            })
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Connection record with the given patient id and name
pub fn connection(patient_id: &str, first_name: &str, last_name: &str) -> Value {
    json!({
        "patientId": patient_id,
        "firstName": first_name,
        "lastName": last_name,
        "sensor": { "sn": SENSOR_SN, "a": 1_661_751_913 }
    })
}

fn expired_session_body() -> Value {
    json!({ "status": 2, "error": { "message": "notAuthenticated" } })
}

async fn login(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    state.record("login", &headers);
    state.login_bodies.lock().unwrap().push(body);

    if let Some(http_status) = state.login_http_statuses.lock().unwrap().pop_front() {
        return (http_status, Json(expired_session_body()));
    }

    let status = state.login_statuses.lock().unwrap().pop_front().unwrap_or(0);
    if status != 0 {
        return (StatusCode::OK, Json(json!({ "status": status })));
    }

    let n = state.issued_tokens.fetch_add(1, Ordering::SeqCst) + 1;
    let token = format!("token-{n}");
    *state.current_token.lock().unwrap() = Some(token.clone());

    let mut session: Value = serde_json::from_str(SESSION_JSON).unwrap();
    session["data"]["authTicket"]["token"] = Value::String(token);
    (StatusCode::OK, Json(session))
}

async fn connections(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.connections_calls.fetch_add(1, Ordering::SeqCst);
    state.record("connections", &headers);

    let status = state.authorize(&state.connections_statuses, &headers);
    if status != StatusCode::OK {
        return (status, Json(expired_session_body()));
    }
    let body = state
        .connections_body
        .lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| serde_json::from_str(CONNECTIONS_JSON).unwrap());
    (StatusCode::OK, Json(body))
}

async fn graph(
    State(state): State<Arc<MockState>>,
    Path(patient_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.graph_calls.fetch_add(1, Ordering::SeqCst);
    state.record("graph", &headers);

    let delay = *state.graph_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let status = state.authorize(&state.graph_statuses, &headers);
    if status != StatusCode::OK {
        return (status, Json(expired_session_body()));
    }
    let mut body: Value = serde_json::from_str(MEASUREMENTS_JSON).unwrap();
    body["data"]["connection"]["patientId"] = Value::String(patient_id);
    (StatusCode::OK, Json(body))
}

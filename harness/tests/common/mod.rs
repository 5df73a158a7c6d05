//! Common Test Utilities for Integration Tests
//!
//! In-process mock of the registration service: scripted per-endpoint
//! status queues, call counters, and cookie-gated student endpoints so the
//! real reqwest transport is exercised end to end.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Shared scripting state for one mock server instance
#[derive(Default)]
pub struct MockState {
    login_script: Mutex<VecDeque<u16>>,
    enroll_script: Mutex<VecDeque<u16>>,

    pub login_calls: AtomicU64,
    pub course_list_calls: AtomicU64,
    pub enroll_calls: AtomicU64,

    /// Usernames seen at the login endpoint, in arrival order
    pub usernames: Mutex<Vec<String>>,
    /// Course ids seen at the enrollment endpoint, in arrival order
    pub enrolled_courses: Mutex<Vec<u32>>,
    /// Admin endpoints hit, in arrival order
    pub admin_calls: Mutex<Vec<&'static str>>,
}

pub struct MockRegistrationServer {
    pub state: Arc<MockState>,
    base_url: String,
}

impl MockRegistrationServer {
    /// Bind on an ephemeral port and serve the mock API in the background
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/courses/", get(list_courses))
            .route("/api/v1/course-reg/enrollment", post(enroll))
            .route("/api/v1/admin/registration/pause", post(admin_pause))
            .route("/api/v1/admin/registration/start", post(admin_start))
            .route("/api/v1/admin/setup/enrollments/reset", delete(admin_reset))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Queue login responses; once drained the endpoint returns 200
    pub fn script_logins(&self, codes: &[u16]) {
        *self.state.login_script.lock().unwrap() = codes.iter().copied().collect();
    }

    /// Queue enrollment responses; once drained the endpoint returns 200
    pub fn script_enrollments(&self, codes: &[u16]) {
        *self.state.enroll_script.lock().unwrap() = codes.iter().copied().collect();
    }
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("session="))
}

fn scripted_status(script: &Mutex<VecDeque<u16>>) -> StatusCode {
    let code = script.lock().unwrap().pop_front().unwrap_or(200);
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(username) = body.get("username").and_then(Value::as_str) {
        state.usernames.lock().unwrap().push(username.to_string());
    }

    let status = scripted_status(&state.login_script);
    if status == StatusCode::OK {
        (
            status,
            [(header::SET_COOKIE, "session=mock-token; Path=/")],
            Json(json!({ "message": "ok" })),
        )
            .into_response()
    } else {
        (status, Json(json!({ "message": "login failed" }))).into_response()
    }
}

async fn list_courses(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.course_list_calls.fetch_add(1, Ordering::SeqCst);
    if !has_session_cookie(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([])).into_response()
}

async fn enroll(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.enroll_calls.fetch_add(1, Ordering::SeqCst);
    if !has_session_cookie(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "no session" })),
        )
            .into_response();
    }
    if let Some(id) = body.get("course_id").and_then(Value::as_u64) {
        state.enrolled_courses.lock().unwrap().push(id as u32);
    }

    let status = scripted_status(&state.enroll_script);
    (status, Json(json!({ "message": status.as_str() }))).into_response()
}

async fn admin_pause(State(state): State<Arc<MockState>>) -> StatusCode {
    state.admin_calls.lock().unwrap().push("pause");
    StatusCode::OK
}

async fn admin_reset(State(state): State<Arc<MockState>>) -> StatusCode {
    state.admin_calls.lock().unwrap().push("reset");
    StatusCode::OK
}

async fn admin_start(State(state): State<Arc<MockState>>) -> StatusCode {
    state.admin_calls.lock().unwrap().push("start");
    StatusCode::OK
}

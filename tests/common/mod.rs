// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use chrono::{DateTime, TimeZone, Utc};
use skylog::config::Config;
use skylog::models::FlightDraft;
use skylog::routes::create_router;
use skylog::services::FlightParser;
use skylog::storage::{KeyValueStore, MemoryStore};
use skylog::time_utils::FixedClock;
use skylog::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// The instant every test app believes is "now".
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Parser returning a canned answer and counting how often it was asked.
#[derive(Default)]
pub struct FakeParser {
    pub answer: Option<FlightDraft>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeParser {
    pub fn answering(answer: Option<FlightDraft>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightParser for FakeParser {
    async fn parse_text(&self, _text: &str, _now: DateTime<Utc>) -> Option<FlightDraft> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

/// Create a test app over `storage` with the given parser and a fixed clock.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with(
    storage: Arc<dyn KeyValueStore>,
    parser: Arc<dyn FlightParser>,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        storage,
        parser,
        Arc::new(FixedClock(test_now())),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app with in-memory storage (seed flights) and no parser answers.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(
        Arc::new(MemoryStore::new()),
        Arc::new(FakeParser::default()),
    )
}

/// Create a test app whose flight log starts empty.
#[allow(dead_code)]
pub fn create_empty_test_app() -> (axum::Router, Arc<AppState>) {
    let storage = MemoryStore::new().with_entry(skylog::storage::keys::FLIGHTS, "[]");
    create_test_app_with(Arc::new(storage), Arc::new(FakeParser::default()))
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
